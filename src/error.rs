//! Error taxonomy for the notifier pipeline and startup configuration

use thiserror::Error;

/// Failures raised by a pipeline stage.
///
/// Every variant is recovered at the cycle boundary; none of them terminates
/// the process.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    /// Neither the primary nor the fallback fetch produced any bars.
    #[error("no market data available for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },

    /// The series is empty or too short for the longest indicator window.
    #[error("insufficient data: {available} bars, {required} required")]
    InsufficientData { available: usize, required: usize },

    /// The messaging transport rejected or failed to deliver a message.
    #[error("message delivery failed: {0}")]
    DeliveryFailure(String),

    #[error("unexpected cycle failure: {0}")]
    Unexpected(String),
}

impl PipelineError {
    pub fn data_unavailable(ticker: &str, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}

/// Startup configuration failures. These are fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}
