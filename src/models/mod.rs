//! Shared data models spanning the pipeline stages.

pub mod indicators;
pub mod signal;

pub use indicators::{BarInterval, Candle, IndicatorSeries, PriceSeries};
pub use signal::{SignalDirection, SignalReading};
