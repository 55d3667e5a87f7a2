//! Take-profit/stop-loss strategy engine.
//!
//! Threshold math is pure; the service persists high-watermark updates
//! and mode switches through the lot store as atomic read-modify-write
//! transactions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{TAKE_PROFIT_RATIO, TRAILING_WATERMARK_RATIO};
use crate::errors::Result;
use crate::lots::{LotStoreTrait, LotTransaction, StrategyMode};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyThresholds {
    pub take_profit: Decimal,
    pub stop_loss: Decimal,
}

/// Computes the TP/SL thresholds for a position.
///
/// Manual mode uses the user-set values, falling back to the auto
/// defaults when unset. Auto mode trails the take-profit under the high
/// watermark while the stop-loss stays at breakeven; it never trails
/// downward because the watermark is monotonic.
pub fn thresholds(
    mode: StrategyMode,
    avg_cost: Decimal,
    high_watermark: Decimal,
    manual_take_profit: Option<Decimal>,
    manual_stop_loss: Option<Decimal>,
) -> StrategyThresholds {
    let tp_ratio: Decimal = TAKE_PROFIT_RATIO.parse().unwrap_or(Decimal::ONE);
    let trail_ratio: Decimal = TRAILING_WATERMARK_RATIO.parse().unwrap_or(Decimal::ONE);
    let base_tp = avg_cost * tp_ratio;

    match mode {
        StrategyMode::Manual => StrategyThresholds {
            take_profit: manual_take_profit.unwrap_or(base_tp),
            stop_loss: manual_stop_loss.unwrap_or(avg_cost),
        },
        StrategyMode::Auto => StrategyThresholds {
            take_profit: base_tp.max(high_watermark * trail_ratio),
            stop_loss: avg_cost,
        },
    }
}

#[async_trait]
pub trait StrategyServiceTrait: Send + Sync {
    /// Raises stored high watermarks for every lot whose current price
    /// exceeds them. Monotonic and idempotent: replaying the same
    /// prices writes nothing. Returns the number of lots updated.
    async fn refresh_high_watermarks(
        &self,
        owner_id: &str,
        current_prices: &HashMap<String, Decimal>,
    ) -> Result<usize>;

    /// Switches a lot's strategy mode. A pure reassignment: switching
    /// to manual preserves the stored watermark but stops using it.
    async fn set_strategy_mode(
        &self,
        lot_id: &str,
        mode: StrategyMode,
        manual_take_profit: Option<Decimal>,
        manual_stop_loss: Option<Decimal>,
    ) -> Result<()>;
}

#[derive(Clone)]
pub struct StrategyService {
    lot_store: Arc<dyn LotStoreTrait>,
}

impl StrategyService {
    pub fn new(lot_store: Arc<dyn LotStoreTrait>) -> Self {
        Self { lot_store }
    }
}

#[async_trait]
impl StrategyServiceTrait for StrategyService {
    async fn refresh_high_watermarks(
        &self,
        owner_id: &str,
        current_prices: &HashMap<String, Decimal>,
    ) -> Result<usize> {
        let lots = self.lot_store.list_lots(owner_id)?;

        let mut tx = LotTransaction::default();
        for mut lot in lots {
            let Some(&price) = current_prices.get(&lot.ticker) else {
                continue;
            };
            if lot.raise_watermark(price) {
                debug!(
                    "Watermark for lot {} ({}) raised to {}",
                    lot.id, lot.ticker, price
                );
                tx.updates.push(lot);
            }
        }

        let updated = tx.updates.len();
        if updated > 0 {
            self.lot_store.apply(owner_id, tx).await?;
        }
        Ok(updated)
    }

    async fn set_strategy_mode(
        &self,
        lot_id: &str,
        mode: StrategyMode,
        manual_take_profit: Option<Decimal>,
        manual_stop_loss: Option<Decimal>,
    ) -> Result<()> {
        let mut lot = self.lot_store.get_lot(lot_id)?;
        lot.strategy_mode = mode;
        match mode {
            StrategyMode::Manual => {
                lot.manual_take_profit = manual_take_profit;
                lot.manual_stop_loss = manual_stop_loss;
            }
            StrategyMode::Auto => {
                lot.manual_take_profit = None;
                lot.manual_stop_loss = None;
            }
        }
        self.lot_store.upsert_lot(lot).await?;
        Ok(())
    }
}
