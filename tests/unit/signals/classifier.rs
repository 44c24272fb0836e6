//! Unit tests for signal classification

use crate::test_utils::{buy_scenario_closes, sell_scenario_closes, series_from_closes};
use rsi_monitor::error::PipelineError;
use rsi_monitor::indicators::IndicatorEngine;
use rsi_monitor::models::indicators::IndicatorSeries;
use rsi_monitor::models::signal::SignalDirection;
use rsi_monitor::signals::{SignalClassifier, SignalThresholds};

#[test]
fn test_boundary_scenarios() {
    let classifier = SignalClassifier::default();
    assert_eq!(classifier.decide(29.99, 110.0, 100.0), SignalDirection::Buy);
    assert_eq!(classifier.decide(70.01, 90.0, 100.0), SignalDirection::Sell);
    assert_eq!(classifier.decide(30.00, 110.0, 100.0), SignalDirection::Neutral);
    assert_eq!(classifier.decide(50.0, 100.0, 100.0), SignalDirection::Neutral);
}

#[test]
fn test_decide_is_deterministic() {
    let classifier = SignalClassifier::default();
    for _ in 0..3 {
        assert_eq!(classifier.decide(29.99, 110.0, 100.0), SignalDirection::Buy);
    }
}

#[test]
fn test_custom_thresholds() {
    let classifier = SignalClassifier::new(SignalThresholds {
        oversold: 40.0,
        overbought: 60.0,
    });
    assert_eq!(classifier.decide(35.0, 110.0, 100.0), SignalDirection::Buy);
    assert_eq!(classifier.decide(65.0, 90.0, 100.0), SignalDirection::Sell);
}

#[test]
fn test_classify_reads_last_row() {
    let indicators = IndicatorEngine::new()
        .compute(series_from_closes(&buy_scenario_closes()))
        .unwrap();
    let reading = SignalClassifier::default().classify(&indicators).unwrap();

    assert_eq!(reading.signal, SignalDirection::Buy);
    assert_eq!(reading.ticker, "SPY");
    assert_eq!(format!("{:.2}", reading.price), "147.50");
    assert!(reading.rsi < 30.0);
    assert!(reading.price > reading.ma200);
    assert_eq!(Some(reading.ma200), *indicators.ma200.last().unwrap());
}

#[test]
fn test_classify_sell_scenario() {
    let indicators = IndicatorEngine::new()
        .compute(series_from_closes(&sell_scenario_closes()))
        .unwrap();
    let reading = SignalClassifier::default().classify(&indicators).unwrap();

    assert_eq!(reading.signal, SignalDirection::Sell);
    assert!(reading.rsi > 70.0);
    assert!(reading.price < reading.ma200);
}

#[test]
fn test_undefined_last_row_is_insufficient() {
    let closes = buy_scenario_closes();
    let prices = series_from_closes(&closes[..50]);
    let indicators = IndicatorSeries {
        rsi: vec![Some(25.0); 50],
        ma200: vec![None; 50],
        prices,
    };

    let err = SignalClassifier::default().classify(&indicators).unwrap_err();
    assert!(matches!(err, PipelineError::InsufficientData { available: 50, .. }));
}
