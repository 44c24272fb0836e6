//! Single-instrument RSI / MA200 signal notifier.
//!
//! One cycle fetches price bars, computes RSI(14) and SMA(200), classifies
//! the latest row into a BUY / SELL / NEUTRAL signal and posts a message to
//! a chat endpoint. The scheduler repeats the cycle on a fixed cadence.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use config::Config;
pub use error::{ConfigError, PipelineError};
