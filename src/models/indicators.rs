use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One OHLCV bar. Only `close` is guaranteed finite; the other fields are
/// `NaN` when the provider sent something that could not be coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}

/// Bar granularity requested from the market data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarInterval {
    Hour1,
    Day1,
}

impl BarInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarInterval::Hour1 => "1h",
            BarInterval::Day1 => "1d",
        }
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-ordered bars for one ticker.
///
/// Construction sorts by timestamp and keeps the last bar for any duplicated
/// timestamp, so timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub interval: BarInterval,
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, interval: BarInterval, mut candles: Vec<Candle>) -> Self {
        // stable sort keeps provider order within equal timestamps, so the
        // later duplicate wins below
        candles.sort_by_key(|c| c.timestamp);
        let mut deduped: Vec<Candle> = Vec::with_capacity(candles.len());
        for candle in candles {
            match deduped.last_mut() {
                Some(last) if last.timestamp == candle.timestamp => *last = candle,
                _ => deduped.push(candle),
            }
        }

        Self {
            ticker: ticker.into(),
            interval,
            candles: deduped,
        }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// One-dimensional projection of the closing prices
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }
}

/// A price series with RSI and MA200 columns aligned to its bars.
///
/// `None` marks entries whose lookback window is not yet full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub prices: PriceSeries,
    pub rsi: Vec<Option<f64>>,
    pub ma200: Vec<Option<f64>>,
}

/// The values of the most recent bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestRow {
    pub close: f64,
    pub rsi: Option<f64>,
    pub ma200: Option<f64>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn ticker(&self) -> &str {
        &self.prices.ticker
    }

    pub fn last_row(&self) -> Option<LatestRow> {
        let candle = self.prices.last()?;
        Some(LatestRow {
            close: candle.close,
            rsi: self.rsi.last().copied().flatten(),
            ma200: self.ma200.last().copied().flatten(),
        })
    }
}
