//! Unit tests for price series normalization

use crate::test_utils::{candles_from_closes, series_from_closes};
use rsi_monitor::models::indicators::{BarInterval, PriceSeries};
use rsi_monitor::models::signal::{SignalDirection, SignalReading};

#[test]
fn test_series_sorted_and_deduplicated() {
    let mut candles = candles_from_closes(&[1.0, 2.0, 3.0]);
    let mut duplicate = candles[1].clone();
    duplicate.close = 20.0;
    candles.reverse();
    candles.push(duplicate);

    let series = PriceSeries::new("SPY", BarInterval::Day1, candles);
    assert_eq!(series.closes(), vec![1.0, 20.0, 3.0]);
    assert!(series
        .candles()
        .windows(2)
        .all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn test_last_row_of_empty_series() {
    let series = series_from_closes(&[]);
    assert!(series.is_empty());
    assert!(series.last().is_none());
}

#[test]
fn test_distance_pct() {
    let reading = SignalReading {
        ticker: "SPY".to_string(),
        signal: SignalDirection::Buy,
        rsi: 25.0,
        price: 110.0,
        ma200: 100.0,
        timestamp: chrono::Utc::now(),
    };
    assert!((reading.distance_pct() - 10.0).abs() < 1e-9);
    assert_eq!(SignalDirection::Neutral.to_string(), "NEUTRAL");
}
