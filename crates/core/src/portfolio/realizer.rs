//! Sell realization: validates a sell, mutates or removes the affected
//! lots in one atomic store transaction, and appends realized trades to
//! the ledger. All validation happens before any mutation; a failed
//! sell writes nothing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, StoreError, TradeError};
use crate::lots::{
    LedgerTrait, LotStoreTrait, LotTransaction, PurchaseLot, RealizedTrade, TradeReason,
};

/// What a sell applies to. The duck-typed "lot or position" union of
/// the old sell paths is resolved here explicitly: a position target
/// scopes the sell to every lot of the ticker, a lot target to exactly
/// one lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SellTarget {
    Position { ticker: String },
    Lot { lot_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    pub owner_id: String,
    pub target: SellTarget,
    pub shares_to_sell: Decimal,
    pub sell_price: Decimal,
    /// Broker fee for this sell, split across lots by share count.
    pub manual_fee: Decimal,
    /// Transaction tax for this sell, split the same way.
    pub manual_tax: Decimal,
}

#[async_trait]
pub trait RealizerServiceTrait: Send + Sync {
    /// Executes a full or partial sell. Returns the appended trades.
    async fn sell(&self, request: SellRequest) -> Result<Vec<RealizedTrade>>;
}

#[derive(Clone)]
pub struct RealizerService {
    lot_store: Arc<dyn LotStoreTrait>,
    ledger: Arc<dyn LedgerTrait>,
}

impl RealizerService {
    pub fn new(lot_store: Arc<dyn LotStoreTrait>, ledger: Arc<dyn LedgerTrait>) -> Self {
        Self { lot_store, ledger }
    }

    /// Resolves the lots a sell target applies to, most recent first.
    fn resolve_lots(&self, owner_id: &str, target: &SellTarget) -> Result<Vec<PurchaseLot>> {
        match target {
            SellTarget::Position { ticker } => {
                let mut lots: Vec<PurchaseLot> = self
                    .lot_store
                    .list_lots(owner_id)?
                    .into_iter()
                    .filter(|l| &l.ticker == ticker)
                    .collect();
                if lots.is_empty() {
                    return Err(StoreError::NotFound(format!(
                        "no open lots for {} under owner {}",
                        ticker, owner_id
                    ))
                    .into());
                }
                lots.sort_by(|a, b| b.acquired_at.cmp(&a.acquired_at));
                Ok(lots)
            }
            SellTarget::Lot { lot_id } => {
                let lot = self.lot_store.get_lot(lot_id)?;
                if lot.owner_id != owner_id {
                    return Err(StoreError::NotFound(format!("lot {}", lot_id)).into());
                }
                Ok(vec![lot])
            }
        }
    }

    /// Builds one realized trade per sold lot, pro-rating the manual
    /// fee and tax across lots by share count.
    fn full_sell_trades(
        &self,
        request: &SellRequest,
        lots: &[PurchaseLot],
        total_shares: Decimal,
    ) -> Vec<RealizedTrade> {
        let realized_at = Utc::now();
        lots.iter()
            .map(|lot| {
                let share_of_sale = lot.shares / total_shares;
                RealizedTrade {
                    id: Uuid::new_v4().to_string(),
                    owner_id: request.owner_id.clone(),
                    ticker: lot.ticker.clone(),
                    shares_sold: lot.shares,
                    cost_price_per_share: lot.cost_price_per_share,
                    sell_price: request.sell_price,
                    total_fee: lot.buy_fee + request.manual_fee * share_of_sale,
                    total_tax: request.manual_tax * share_of_sale,
                    realized_at,
                    reason: TradeReason::Sold,
                }
            })
            .collect()
    }
}

#[async_trait]
impl RealizerServiceTrait for RealizerService {
    async fn sell(&self, request: SellRequest) -> Result<Vec<RealizedTrade>> {
        if request.sell_price <= Decimal::ZERO {
            return Err(TradeError::InvalidPrice(request.sell_price).into());
        }

        let lots = self.resolve_lots(&request.owner_id, &request.target)?;
        let total_shares: Decimal = lots.iter().map(|l| l.shares).sum();
        let quantity = request.shares_to_sell;

        if quantity <= Decimal::ZERO || quantity > total_shares {
            return Err(TradeError::InvalidQuantity {
                requested: quantity,
                available: total_shares,
            }
            .into());
        }

        let mut tx = LotTransaction::default();
        let trades: Vec<RealizedTrade>;

        if quantity == total_shares {
            // Full sell: every lot in scope vanishes, one trade per lot.
            tx.deletes = lots.iter().map(|l| l.id.clone()).collect();
            trades = self.full_sell_trades(&request, &lots, total_shares);
        } else {
            // Partial sells never guess an allocation across lots; the
            // caller must pick the lot explicitly.
            if lots.len() > 1 {
                return Err(TradeError::CrossLotPartialSellUnsupported {
                    ticker: lots[0].ticker.clone(),
                    lot_count: lots.len(),
                }
                .into());
            }

            let mut lot = lots.into_iter().next().expect("non-empty lot scope");
            let original_shares = lot.shares;
            let remaining = original_shares - quantity;
            let sold_fee = lot.buy_fee * quantity / original_shares;

            // Scale the embedded fee so fee-per-share is preserved.
            lot.buy_fee = lot.buy_fee * remaining / original_shares;
            lot.shares = remaining;

            trades = vec![RealizedTrade {
                id: Uuid::new_v4().to_string(),
                owner_id: request.owner_id.clone(),
                ticker: lot.ticker.clone(),
                shares_sold: quantity,
                cost_price_per_share: lot.cost_price_per_share,
                sell_price: request.sell_price,
                total_fee: sold_fee + request.manual_fee,
                total_tax: request.manual_tax,
                realized_at: Utc::now(),
                reason: TradeReason::Sold,
            }];
            tx.updates.push(lot);
        }

        // Lots first; trades only append once the transaction held.
        self.lot_store.apply(&request.owner_id, tx).await?;

        let mut appended = Vec::with_capacity(trades.len());
        for trade in trades {
            appended.push(self.ledger.append_realized_trade(trade).await?);
        }
        debug!(
            "Realized {} share(s) across {} trade(s) for owner {}",
            quantity,
            appended.len(),
            request.owner_id
        );
        Ok(appended)
    }
}
