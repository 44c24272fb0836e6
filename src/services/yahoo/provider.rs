//! Yahoo Finance market data provider implementation

use crate::models::indicators::{BarInterval, Candle};
use crate::services::market_data::{MarketDataProvider, ProviderError};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::messages::ChartResponse;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; rsi-monitor)";

pub struct YahooMarketDataProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooMarketDataProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn chart_url(&self, ticker: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| format!("base url cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_candles(
        &self,
        ticker: &str,
        lookback_days: u32,
        interval: BarInterval,
    ) -> Result<Vec<Candle>, ProviderError> {
        let url = self.chart_url(ticker)?;
        let range = format!("{}d", lookback_days);
        debug!(ticker = %ticker, interval = %interval, range = %range, "Requesting chart data");

        let response = self
            .client
            .get(url)
            .query(&[("range", range.as_str()), ("interval", interval.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Unknown tickers come back as 404 with a chart.error payload
        let parsed: ChartResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                return Err(format!("invalid chart payload: {}", e).into())
            }
            Err(_) => return Err(format!("Yahoo Finance error: {}", status).into()),
        };

        if let Some(err) = parsed.chart.error {
            return Err(format!("Yahoo Finance error {}: {}", err.code, err.description).into());
        }
        if !status.is_success() {
            return Err(format!("Yahoo Finance error: {}", status).into());
        }

        let candles = parsed
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.into_candles())
            .unwrap_or_default();

        debug!(ticker = %ticker, interval = %interval, count = candles.len(), "Parsed chart data");
        Ok(candles)
    }
}
