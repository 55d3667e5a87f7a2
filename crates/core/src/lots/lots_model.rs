//! Purchase lot and realized trade domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Market a ticker trades on. Local-market sells attract commission and
/// transaction tax; foreign-market costs default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    #[default]
    Local,
    Foreign,
}

/// Take-profit/stop-loss strategy mode for a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyMode {
    /// Trailing thresholds derived from cost and the high watermark.
    #[default]
    Auto,
    /// User-supplied fixed thresholds.
    Manual,
}

/// One purchase transaction for a ticker. Exclusively owned by the lot
/// store: created on buy, mutated (shares down, buy_fee pro-rated) on
/// partial sell, deleted on full sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLot {
    pub id: String,
    pub owner_id: String,
    pub ticker: String,
    pub market: Market,
    pub shares: Decimal,
    /// Price per share in the market's local currency.
    pub cost_price_per_share: Decimal,
    /// Acquisition fee for the whole lot, local currency.
    pub buy_fee: Decimal,
    pub acquired_at: DateTime<Utc>,
    pub strategy_mode: StrategyMode,
    /// Highest price observed since entry. Non-decreasing under auto
    /// mode; initialized at or above cost.
    pub high_watermark_price: Decimal,
    pub manual_take_profit: Option<Decimal>,
    pub manual_stop_loss: Option<Decimal>,
    /// Optimistic-concurrency counter, bumped by the store on every
    /// successful mutation.
    #[serde(default)]
    pub version: i64,
}

impl PurchaseLot {
    /// Creates a new lot for a buy. The high watermark starts at the
    /// cost price so the trailing take-profit never trails below entry.
    pub fn new(
        owner_id: impl Into<String>,
        ticker: impl Into<String>,
        market: Market,
        shares: Decimal,
        cost_price_per_share: Decimal,
        buy_fee: Decimal,
        acquired_at: DateTime<Utc>,
    ) -> Self {
        PurchaseLot {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            ticker: ticker.into(),
            market,
            shares,
            cost_price_per_share,
            buy_fee,
            acquired_at,
            strategy_mode: StrategyMode::Auto,
            high_watermark_price: cost_price_per_share,
            manual_take_profit: None,
            manual_stop_loss: None,
            version: 0,
        }
    }

    /// Raises the high watermark if `price` exceeds it. Monotonic and
    /// idempotent: replaying the same price never lowers the value.
    /// Returns true when the watermark moved.
    pub fn raise_watermark(&mut self, price: Decimal) -> bool {
        if price > self.high_watermark_price {
            self.high_watermark_price = price;
            true
        } else {
            false
        }
    }
}

/// Why a realized trade was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeReason {
    /// A sell executed through the realizer.
    Sold,
    /// A manual position adjustment.
    Adjusted,
}

/// A completed sell, appended to the ledger. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedTrade {
    pub id: String,
    pub owner_id: String,
    pub ticker: String,
    pub shares_sold: Decimal,
    pub cost_price_per_share: Decimal,
    pub sell_price: Decimal,
    /// Pro-rated acquisition fee plus the caller-supplied sell fee.
    pub total_fee: Decimal,
    pub total_tax: Decimal,
    pub realized_at: DateTime<Utc>,
    pub reason: TradeReason,
}

/// A batch of lot mutations applied atomically against the store.
///
/// Every update carries the version the caller read; the store rejects
/// the whole batch with `ConcurrentModification` when any version is
/// stale, so concurrent sessions cannot lose updates.
#[derive(Debug, Clone, Default)]
pub struct LotTransaction {
    pub updates: Vec<PurchaseLot>,
    pub deletes: Vec<String>,
}

impl LotTransaction {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.deletes.is_empty()
    }
}
