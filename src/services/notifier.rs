//! Renders a signal reading and hands it to the messaging transport.

use crate::config::ChatCredentials;
use crate::error::PipelineError;
use crate::models::signal::SignalReading;
use std::sync::Arc;
use tracing::{error, info};

/// Text-formatting mode passed across the transport boundary.
///
/// `Notifier` always renders Markdown; `Plain` is for callers sending raw
/// text that must not be interpreted by the chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
    Plain,
}

impl ParseMode {
    /// Value of the Bot API `parse_mode` field; plain text omits it
    pub fn api_value(&self) -> Option<&'static str> {
        match self {
            ParseMode::Markdown => Some("Markdown"),
            ParseMode::Plain => None,
        }
    }
}

#[async_trait::async_trait]
pub trait MessageTransport {
    async fn send_message(
        &self,
        credentials: &ChatCredentials,
        text: &str,
        parse_mode: ParseMode,
    ) -> Result<(), PipelineError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(PipelineError),
}

pub struct Notifier {
    transport: Arc<dyn MessageTransport + Send + Sync>,
}

impl Notifier {
    pub fn new(transport: Arc<dyn MessageTransport + Send + Sync>) -> Self {
        Self { transport }
    }

    /// Render the fixed message template for a reading
    pub fn render(reading: &SignalReading) -> String {
        format!(
            "📊 *{}* Update:\n\
             Signal: *{}*\n\
             Current price: ${:.2}\n\
             RSI: {:.2}\n\
             MA200: ${:.2}\n\
             Distance to MA200: {:.2}%\n",
            reading.ticker,
            reading.signal.label(),
            reading.price,
            reading.rsi,
            reading.ma200,
            reading.distance_pct()
        )
    }

    /// Deliver the reading. Transport failures are logged and reported in
    /// the outcome, never returned as an error.
    pub async fn notify(
        &self,
        reading: &SignalReading,
        credentials: &ChatCredentials,
    ) -> DeliveryOutcome {
        let text = Self::render(reading);
        match self
            .transport
            .send_message(credentials, &text, ParseMode::Markdown)
            .await
        {
            Ok(()) => {
                info!(
                    ticker = %reading.ticker,
                    signal = %reading.signal,
                    "Notifier: delivered {} signal for {}",
                    reading.signal,
                    reading.ticker
                );
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                let failure = match e {
                    PipelineError::DeliveryFailure(_) => e,
                    other => PipelineError::DeliveryFailure(other.to_string()),
                };
                error!(
                    ticker = %reading.ticker,
                    error = %failure,
                    "Notifier: failed to deliver message for {}",
                    reading.ticker
                );
                DeliveryOutcome::Failed(failure)
            }
        }
    }
}
