use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
    Neutral,
}

impl SignalDirection {
    pub fn label(&self) -> &'static str {
        match self {
            SignalDirection::Buy => "BUY",
            SignalDirection::Sell => "SELL",
            SignalDirection::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decision state for one cycle, taken from the last indicator row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReading {
    pub ticker: String,
    pub signal: SignalDirection,
    pub rsi: f64,
    pub price: f64,
    pub ma200: f64,
    pub timestamp: DateTime<Utc>,
}

impl SignalReading {
    /// Percentage distance of price from MA200
    pub fn distance_pct(&self) -> f64 {
        if self.ma200 == 0.0 {
            return 0.0;
        }
        (self.price - self.ma200) / self.ma200 * 100.0
    }
}
