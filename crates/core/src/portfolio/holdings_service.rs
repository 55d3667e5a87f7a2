//! Read-path façade: lots + price snapshots in, valued positions out.
//!
//! The service itself holds no state; it is invoked synchronously per
//! request or refresh cycle, and the caller supplies fresh snapshots by
//! re-invoking it.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::aggregator::aggregate_lots;
use super::positions_model::ValuedPosition;
use super::valuation::value_position;
use crate::errors::Result;
use crate::lots::LotStoreTrait;
use crate::market_data::PriceFeedTrait;

#[async_trait]
pub trait HoldingsServiceTrait: Send + Sync {
    /// Aggregates and values every open position for an owner.
    /// Positions without price data are valued in degraded mode rather
    /// than dropped.
    async fn get_holdings(&self, owner_id: &str) -> Result<Vec<ValuedPosition>>;
}

#[derive(Clone)]
pub struct HoldingsService {
    lot_store: Arc<dyn LotStoreTrait>,
    price_feed: Arc<dyn PriceFeedTrait>,
}

impl HoldingsService {
    pub fn new(lot_store: Arc<dyn LotStoreTrait>, price_feed: Arc<dyn PriceFeedTrait>) -> Self {
        Self {
            lot_store,
            price_feed,
        }
    }
}

#[async_trait]
impl HoldingsServiceTrait for HoldingsService {
    async fn get_holdings(&self, owner_id: &str) -> Result<Vec<ValuedPosition>> {
        let lots = self.lot_store.list_lots(owner_id)?;
        if lots.is_empty() {
            return Ok(Vec::new());
        }

        let positions = aggregate_lots(&lots);
        let tickers: Vec<String> = positions.iter().map(|p| p.ticker.clone()).collect();
        let snapshots = self.price_feed.get_snapshots(&tickers).await?;

        debug!(
            "Valuing {} positions for owner {} ({} snapshots)",
            positions.len(),
            owner_id,
            snapshots.len()
        );

        Ok(positions
            .iter()
            .map(|position| value_position(position, snapshots.get(&position.ticker)))
            .collect())
    }
}
