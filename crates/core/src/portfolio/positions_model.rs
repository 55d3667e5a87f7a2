//! Aggregated position and valuation models. Derived data, never
//! persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lots::{Market, PurchaseLot, StrategyMode};

/// All open lots for one ticker under one owner, collapsed to a
/// quantity-weighted view. Produced by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub ticker: String,
    pub market: Market,
    pub total_shares: Decimal,
    /// Quantity-weighted mean purchase price, local currency.
    pub weighted_avg_cost: Decimal,
    /// Sum of shares x cost across lots, local currency, fee-exclusive.
    pub raw_cost: Decimal,
    /// Sum of acquisition fees across lots, local currency.
    pub total_buy_fee: Decimal,
    /// True when more than one lot contributes to the position.
    pub is_multiple: bool,
    /// Strategy inputs folded over the lots: mode and manual thresholds
    /// from the most recent lot, watermark as the max across the group.
    pub strategy_mode: StrategyMode,
    pub high_watermark_price: Decimal,
    pub manual_take_profit: Option<Decimal>,
    pub manual_stop_loss: Option<Decimal>,
    /// Contributing lots, most recent first.
    pub lots: Vec<PurchaseLot>,
}

/// Which input the valuator resolved the current price from.
/// `CostBasis` is the explicit degraded mode used when no market price
/// is available, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceSource {
    Realtime,
    Close,
    CostBasis,
}

/// A position marked to market: valuation, trading-cost estimate,
/// unrealized P&L, and strategy thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedPosition {
    #[serde(flatten)]
    pub position: Position,

    pub current_price: Decimal,
    pub price_source: PriceSource,
    pub fx_rate_to_base: Decimal,

    /// Headline move vs. previous close and its percentage; zero when
    /// the previous close is unavailable (guarded division).
    pub change: Decimal,
    pub change_percent: Decimal,
    /// Close-track move: close vs. previous close.
    pub close_change: Option<Decimal>,
    pub close_change_percent: Option<Decimal>,
    /// Realtime-track move: intraday price vs. last settled close.
    pub realtime_change: Option<Decimal>,
    pub realtime_change_percent: Option<Decimal>,

    pub market_value_local: Decimal,
    pub market_value_base: Decimal,
    /// Fee-inclusive cost basis in the base currency.
    pub total_cost_basis: Decimal,

    /// Estimated round-trip exit costs, local currency.
    pub sell_commission: Decimal,
    pub sell_tax: Decimal,
    /// Commission plus tax, converted to the base currency.
    pub estimated_sell_cost: Decimal,
    pub estimated_net_proceeds: Decimal,
    pub unrealized_pnl: Decimal,
    /// Percentage return on cost basis, x100, 0 when the basis is zero.
    pub roi: Decimal,

    pub take_profit: Decimal,
    pub stop_loss: Decimal,
}
