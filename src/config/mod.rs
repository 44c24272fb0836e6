//! Process configuration loaded once at startup
//!
//! Values come from the environment (a `.env` file is loaded by the binary
//! before this runs). The resulting `Config` is immutable and shared by
//! reference with every component.

use crate::error::ConfigError;
use crate::signals::SignalThresholds;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 3600;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 60;
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Credentials for the chat endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct ChatCredentials {
    pub token: String,
    pub chat_id: String,
}

impl fmt::Debug for ChatCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCredentials")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ticker: String,
    pub chat: ChatCredentials,
    pub poll_interval: Duration,
    /// Optional 6-field cron expression; overrides `poll_interval` when set.
    pub schedule_cron: Option<String>,
    pub lookback_days: u32,
    pub http_timeout: Duration,
    pub yahoo_base_url: String,
    pub telegram_api_url: String,
    pub thresholds: SignalThresholds,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = get("TELEGRAM_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;
        let chat_id = get("TELEGRAM_CHAT_ID").ok_or(ConfigError::Missing("TELEGRAM_CHAT_ID"))?;
        let ticker = get("TICKER").ok_or(ConfigError::Missing("TICKER"))?;

        let poll_seconds: u64 = parse_or(
            "POLL_INTERVAL_SECONDS",
            get("POLL_INTERVAL_SECONDS"),
            DEFAULT_POLL_INTERVAL_SECONDS,
        )?;
        if poll_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "POLL_INTERVAL_SECONDS",
                message: "must be > 0".to_string(),
            });
        }

        let schedule_cron = get("SCHEDULE_CRON");
        if let Some(ref expr) = schedule_cron {
            cron::Schedule::from_str(expr).map_err(|e| ConfigError::Invalid {
                key: "SCHEDULE_CRON",
                message: e.to_string(),
            })?;
        }

        let lookback_days: u32 =
            parse_or("LOOKBACK_DAYS", get("LOOKBACK_DAYS"), DEFAULT_LOOKBACK_DAYS)?;
        let timeout_seconds: u64 = parse_or(
            "HTTP_TIMEOUT_SECONDS",
            get("HTTP_TIMEOUT_SECONDS"),
            DEFAULT_HTTP_TIMEOUT_SECONDS,
        )?;
        for (key, value) in [
            ("LOOKBACK_DAYS", u64::from(lookback_days)),
            ("HTTP_TIMEOUT_SECONDS", timeout_seconds),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    message: "must be > 0".to_string(),
                });
            }
        }

        let defaults = SignalThresholds::default();
        let thresholds = SignalThresholds {
            oversold: parse_or("RSI_OVERSOLD", get("RSI_OVERSOLD"), defaults.oversold)?,
            overbought: parse_or("RSI_OVERBOUGHT", get("RSI_OVERBOUGHT"), defaults.overbought)?,
        };
        if thresholds.oversold >= thresholds.overbought {
            return Err(ConfigError::Invalid {
                key: "RSI_OVERSOLD",
                message: format!(
                    "oversold ({}) must be below overbought ({})",
                    thresholds.oversold, thresholds.overbought
                ),
            });
        }

        let yahoo_base_url =
            base_url("YAHOO_BASE_URL", get("YAHOO_BASE_URL"), DEFAULT_YAHOO_BASE_URL)?;
        let telegram_api_url = base_url(
            "TELEGRAM_API_URL",
            get("TELEGRAM_API_URL"),
            DEFAULT_TELEGRAM_API_URL,
        )?;

        Ok(Self {
            ticker,
            chat: ChatCredentials { token, chat_id },
            poll_interval: Duration::from_secs(poll_seconds),
            schedule_cron,
            lookback_days,
            http_timeout: Duration::from_secs(timeout_seconds),
            yahoo_base_url,
            telegram_api_url,
            thresholds,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            message: format!("'{}': {}", value, e),
        }),
        None => Ok(default),
    }
}

fn base_url(key: &'static str, raw: Option<String>, default: &str) -> Result<String, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_string());
    url::Url::parse(&value).map_err(|e| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })?;
    Ok(value.trim_end_matches('/').to_string())
}

/// Deployment environment, used to pick the log format
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}
