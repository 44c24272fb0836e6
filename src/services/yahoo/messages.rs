//! Chart endpoint payloads and their flattening into candles

use crate::models::indicators::Candle;
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Per-field columns; cells may be numbers, numeric strings or null.
#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Value>,
    #[serde(default)]
    pub high: Vec<Value>,
    #[serde(default)]
    pub low: Vec<Value>,
    #[serde(default)]
    pub close: Vec<Value>,
    #[serde(default)]
    pub volume: Vec<Value>,
}

/// Coerce one JSON cell into a float
pub fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn lenient(column: &[Value], i: usize) -> f64 {
    coerce_f64(column.get(i)).unwrap_or(f64::NAN)
}

impl ChartResult {
    /// Flatten the nested columns into one candle per timestamp.
    ///
    /// Rows without a usable close are dropped; other fields become `NaN`
    /// when they cannot be coerced.
    pub fn into_candles(self) -> Vec<Candle> {
        let quote = match self.indicators.quote.into_iter().next() {
            Some(q) => q,
            None => return Vec::new(),
        };

        self.timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let close = coerce_f64(quote.close.get(i))?;
                let timestamp = DateTime::from_timestamp(ts, 0)?;
                Some(Candle::new(
                    lenient(&quote.open, i),
                    lenient(&quote.high, i),
                    lenient(&quote.low, i),
                    close,
                    lenient(&quote.volume, i),
                    timestamp,
                ))
            })
            .collect()
    }
}
