//! Derives the RSI and MA200 columns for a fetched price series.

use crate::error::PipelineError;
use crate::indicators::momentum::{calculate_rsi, DEFAULT_RSI_PERIOD};
use crate::indicators::trend::{calculate_sma, MA200_PERIOD};
use crate::models::indicators::{IndicatorSeries, PriceSeries};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine {
    rsi_period: usize,
    ma_period: usize,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            ma_period: MA200_PERIOD,
        }
    }
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum number of bars for every column to be defined on the last row
    pub fn required_bars(&self) -> usize {
        self.rsi_period.max(self.ma_period)
    }

    /// Compute RSI and MA200 over the closing prices of `series`.
    ///
    /// Fails with `InsufficientData` when the series cannot fill the longest
    /// window, so the last row is always fully defined on success.
    pub fn compute(&self, series: PriceSeries) -> Result<IndicatorSeries, PipelineError> {
        let required = self.required_bars();
        if series.is_empty() || series.len() < required {
            return Err(PipelineError::InsufficientData {
                available: series.len(),
                required,
            });
        }

        let closes = series.closes();
        let rsi = calculate_rsi(&closes, self.rsi_period);
        let ma200 = calculate_sma(&closes, self.ma_period);

        debug!(
            ticker = %series.ticker,
            bars = closes.len(),
            last_rsi = ?rsi.last().copied().flatten(),
            last_ma200 = ?ma200.last().copied().flatten(),
            "IndicatorEngine: computed indicators"
        );

        Ok(IndicatorSeries {
            prices: series,
            rsi,
            ma200,
        })
    }
}
