//! Turns the latest indicator row into a BUY / SELL / NEUTRAL reading

use crate::error::PipelineError;
use crate::indicators::trend::MA200_PERIOD;
use crate::models::indicators::IndicatorSeries;
use crate::models::signal::{SignalDirection, SignalReading};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalClassifier {
    thresholds: SignalThresholds,
}

impl SignalClassifier {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    /// Decide the signal for one `(rsi, price, ma200)` triple.
    ///
    /// Both comparisons are strict; the first matching rule wins.
    pub fn decide(&self, rsi: f64, price: f64, ma200: f64) -> SignalDirection {
        if rsi < self.thresholds.oversold && price > ma200 {
            SignalDirection::Buy
        } else if rsi > self.thresholds.overbought && price < ma200 {
            SignalDirection::Sell
        } else {
            SignalDirection::Neutral
        }
    }

    /// Classify the last row of `series`.
    ///
    /// An undefined RSI or MA200 on the last row means the history was too
    /// short and is reported as `InsufficientData`.
    pub fn classify(&self, series: &IndicatorSeries) -> Result<SignalReading, PipelineError> {
        let insufficient = || PipelineError::InsufficientData {
            available: series.len(),
            required: MA200_PERIOD,
        };

        let row = series.last_row().ok_or_else(insufficient)?;
        let (rsi, ma200) = match (row.rsi, row.ma200) {
            (Some(rsi), Some(ma200)) => (rsi, ma200),
            _ => return Err(insufficient()),
        };
        let timestamp = series
            .prices
            .last()
            .map(|c| c.timestamp)
            .ok_or_else(insufficient)?;

        Ok(SignalReading {
            ticker: series.ticker().to_string(),
            signal: self.decide(rsi, row.close, ma200),
            rsi,
            price: row.close,
            ma200,
            timestamp,
        })
    }
}
