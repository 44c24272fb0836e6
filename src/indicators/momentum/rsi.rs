//! RSI (Relative Strength Index) indicator

use crate::common::math;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Calculate the RSI column for a closing-price series
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss (Wilder smoothing)
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    math::rsi_series(closes, period)
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> Vec<Option<f64>> {
    calculate_rsi(closes, DEFAULT_RSI_PERIOD)
}
