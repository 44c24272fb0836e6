//! Market data provider interface and the fetch-with-fallback policy.

use crate::error::PipelineError;
use crate::models::indicators::{BarInterval, Candle, PriceSeries};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Get historical candles for a ticker covering the last `lookback_days`.
    ///
    /// An empty vector means the provider had no data for the request.
    async fn get_candles(
        &self,
        ticker: &str,
        lookback_days: u32,
        interval: BarInterval,
    ) -> Result<Vec<Candle>, ProviderError>;
}

/// Fetches a ticker's price series, falling back to a coarser interval
/// when the primary one returns nothing.
pub struct DataFetcher {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    lookback_days: u32,
    primary: BarInterval,
    fallback: BarInterval,
}

impl DataFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider + Send + Sync>, lookback_days: u32) -> Self {
        Self {
            provider,
            lookback_days,
            primary: BarInterval::Hour1,
            fallback: BarInterval::Day1,
        }
    }

    pub async fn fetch(&self, ticker: &str) -> Result<PriceSeries, PipelineError> {
        let mut last_error: Option<String> = None;

        for interval in [self.primary, self.fallback] {
            match self
                .provider
                .get_candles(ticker, self.lookback_days, interval)
                .await
            {
                Ok(candles) if !candles.is_empty() => {
                    let series = PriceSeries::new(ticker, interval, candles);
                    info!(
                        ticker = %ticker,
                        interval = %interval,
                        bars = series.len(),
                        "DataFetcher: fetched {} bars for {}",
                        series.len(),
                        ticker
                    );
                    return Ok(series);
                }
                Ok(_) => {
                    debug!(ticker = %ticker, interval = %interval, "DataFetcher: empty result");
                }
                Err(e) => {
                    warn!(
                        ticker = %ticker,
                        interval = %interval,
                        error = %e,
                        "DataFetcher: provider request failed"
                    );
                    last_error = Some(e.to_string());
                }
            }
        }

        let reason = match last_error {
            Some(e) => format!("no bars at {} or {} ({})", self.primary, self.fallback, e),
            None => format!("no bars at {} or {}", self.primary, self.fallback),
        };
        Err(PipelineError::data_unavailable(ticker, reason))
    }
}
