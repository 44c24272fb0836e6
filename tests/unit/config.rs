//! Unit tests for configuration loading

use rsi_monitor::config::Config;
use rsi_monitor::error::ConfigError;
use std::collections::HashMap;
use std::time::Duration;

fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| values.get(key).cloned())
}

const REQUIRED: [(&str, &str); 3] = [
    ("TELEGRAM_TOKEN", "123:secret"),
    ("TELEGRAM_CHAT_ID", "-100200"),
    ("TICKER", "BTC-USD"),
];

#[test]
fn test_defaults() {
    let config = load(&REQUIRED).unwrap();
    assert_eq!(config.ticker, "BTC-USD");
    assert_eq!(config.chat.chat_id, "-100200");
    assert_eq!(config.poll_interval, Duration::from_secs(3600));
    assert_eq!(config.lookback_days, 60);
    assert_eq!(config.http_timeout, Duration::from_secs(30));
    assert_eq!(config.schedule_cron, None);
    assert_eq!(config.thresholds.oversold, 30.0);
    assert_eq!(config.thresholds.overbought, 70.0);
    assert_eq!(config.yahoo_base_url, "https://query1.finance.yahoo.com");
}

#[test]
fn test_missing_required_fails_fast() {
    for missing in ["TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID", "TICKER"] {
        let pairs: Vec<(&str, &str)> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != missing)
            .collect();
        assert_eq!(load(&pairs).unwrap_err(), ConfigError::Missing(missing));
    }
}

#[test]
fn test_blank_value_counts_as_missing() {
    let mut pairs = REQUIRED.to_vec();
    pairs[2] = ("TICKER", "   ");
    assert_eq!(load(&pairs).unwrap_err(), ConfigError::Missing("TICKER"));
}

#[test]
fn test_overrides() {
    let mut pairs = REQUIRED.to_vec();
    pairs.extend([
        ("POLL_INTERVAL_SECONDS", "900"),
        ("LOOKBACK_DAYS", "30"),
        ("RSI_OVERSOLD", "25"),
        ("RSI_OVERBOUGHT", "75"),
        ("SCHEDULE_CRON", "0 0 * * * *"),
        ("TELEGRAM_API_URL", "http://localhost:8081/"),
    ]);
    let config = load(&pairs).unwrap();
    assert_eq!(config.poll_interval, Duration::from_secs(900));
    assert_eq!(config.lookback_days, 30);
    assert_eq!(config.thresholds.oversold, 25.0);
    assert_eq!(config.schedule_cron.as_deref(), Some("0 0 * * * *"));
    assert_eq!(config.telegram_api_url, "http://localhost:8081");
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        ("POLL_INTERVAL_SECONDS", "0"),
        ("POLL_INTERVAL_SECONDS", "hourly"),
        ("SCHEDULE_CRON", "every hour"),
        ("RSI_OVERSOLD", "80"),
        ("YAHOO_BASE_URL", "not a url"),
    ];
    for (key, value) in cases {
        let mut pairs = REQUIRED.to_vec();
        pairs.push((key, value));
        let err = load(&pairs).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { .. }),
            "{}={} should be invalid, got {:?}",
            key,
            value,
            err
        );
    }
}

#[test]
fn test_zero_lookback_and_timeout_are_rejected() {
    for key in ["LOOKBACK_DAYS", "HTTP_TIMEOUT_SECONDS"] {
        let mut pairs = REQUIRED.to_vec();
        pairs.push((key, "0"));
        match load(&pairs) {
            Err(ConfigError::Invalid { key: rejected, .. }) => assert_eq!(rejected, key),
            other => panic!("{}=0 should be invalid, got {:?}", key, other),
        }
    }
}

#[test]
fn test_debug_redacts_token() {
    let config = load(&REQUIRED).unwrap();
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("123:secret"));
    assert!(rendered.contains("<redacted>"));
}
