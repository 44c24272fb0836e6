//! SMA (Simple Moving Average) indicator

use crate::common::math;

pub const MA200_PERIOD: usize = 200;

/// Calculate the SMA column for a closing-price series
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    math::sma_series(closes, period)
}

/// Long-term trend reference (SMA 200)
pub fn calculate_ma200(closes: &[f64]) -> Vec<Option<f64>> {
    calculate_sma(closes, MA200_PERIOD)
}
