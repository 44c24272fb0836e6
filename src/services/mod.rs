//! External collaborators: market data and message delivery.

pub mod market_data;
pub mod notifier;
pub mod telegram;
pub mod yahoo;

pub use market_data::{DataFetcher, MarketDataProvider};
pub use notifier::{DeliveryOutcome, MessageTransport, Notifier, ParseMode};
