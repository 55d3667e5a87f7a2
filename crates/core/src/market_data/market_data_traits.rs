use async_trait::async_trait;
use std::collections::HashMap;

use super::market_data_model::PriceSnapshot;
use crate::errors::Result;

/// Trait defining the contract for the external price feed.
///
/// Acquisition (polling, websocket feeds, fallbacks between providers)
/// is the implementer's concern; the engine only consumes snapshots.
#[async_trait]
pub trait PriceFeedTrait: Send + Sync {
    /// Fetches the snapshot for one ticker.
    async fn get_snapshot(&self, ticker: &str) -> Result<PriceSnapshot>;

    /// Fetches snapshots for a batch of tickers. Tickers without data
    /// are simply absent from the result; the caller values those
    /// positions in degraded mode.
    async fn get_snapshots(&self, tickers: &[String]) -> Result<HashMap<String, PriceSnapshot>>;
}
