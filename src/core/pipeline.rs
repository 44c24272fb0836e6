//! One fetch → compute → classify → notify pass.

use crate::config::Config;
use crate::error::PipelineError;
use crate::indicators::IndicatorEngine;
use crate::models::signal::SignalReading;
use crate::services::market_data::{DataFetcher, MarketDataProvider};
use crate::services::notifier::{DeliveryOutcome, MessageTransport, Notifier};
use crate::services::telegram::TelegramTransport;
use crate::services::yahoo::YahooMarketDataProvider;
use crate::signals::SignalClassifier;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a single cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Notified {
        reading: SignalReading,
        delivery: DeliveryOutcome,
    },
    Skipped(PipelineError),
}

pub struct Pipeline {
    config: Arc<Config>,
    fetcher: DataFetcher,
    engine: IndicatorEngine,
    classifier: SignalClassifier,
    notifier: Notifier,
}

impl Pipeline {
    pub fn new(
        config: Arc<Config>,
        provider: Arc<dyn MarketDataProvider + Send + Sync>,
        transport: Arc<dyn MessageTransport + Send + Sync>,
    ) -> Self {
        Self {
            fetcher: DataFetcher::new(provider, config.lookback_days),
            engine: IndicatorEngine::new(),
            classifier: SignalClassifier::new(config.thresholds),
            notifier: Notifier::new(transport),
            config,
        }
    }

    /// Wire the Yahoo Finance provider and Telegram transport from config
    pub fn from_config(config: Arc<Config>) -> Result<Self, PipelineError> {
        let provider = YahooMarketDataProvider::new(&config.yahoo_base_url, config.http_timeout)
            .map_err(|e| PipelineError::Unexpected(format!("market data client: {}", e)))?;
        let transport = TelegramTransport::new(&config.telegram_api_url, config.http_timeout)?;
        Ok(Self::new(config, Arc::new(provider), Arc::new(transport)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch, compute and classify without delivering anything
    pub async fn evaluate(&self) -> Result<SignalReading, PipelineError> {
        let prices = self.fetcher.fetch(&self.config.ticker).await?;
        let indicators = self.engine.compute(prices)?;
        self.classifier.classify(&indicators)
    }

    /// Run one full cycle. Failures before delivery skip the notification;
    /// delivery failures are already absorbed by the notifier.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let reading = match self.evaluate().await {
            Ok(reading) => reading,
            Err(e) => {
                warn!(ticker = %self.config.ticker, error = %e, "Cycle skipped");
                return CycleOutcome::Skipped(e);
            }
        };

        info!(
            ticker = %reading.ticker,
            signal = %reading.signal,
            price = reading.price,
            rsi = reading.rsi,
            ma200 = reading.ma200,
            "Signal classified"
        );

        let delivery = self.notifier.notify(&reading, &self.config.chat).await;
        CycleOutcome::Notified { reading, delivery }
    }
}
