//! Position valuation: resolves a current price, computes dual-track
//! price changes, market value, exit-cost estimates, unrealized P&L and
//! ROI. Pure function of (position, snapshot); safe for unlimited
//! concurrent invocation.

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::fees::estimate_sell_costs;
use super::positions_model::{Position, PriceSource, ValuedPosition};
use super::strategy::thresholds;
use crate::constants::PERCENT_DECIMAL_PRECISION;
use crate::market_data::PriceSnapshot;

/// Percentage of `delta` over `base`, x100, rounded. None when the base
/// is zero or missing; the division guard never propagates NaN.
fn percent_of(delta: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        None
    } else {
        Some((delta / base * dec!(100)).round_dp(PERCENT_DECIMAL_PRECISION))
    }
}

/// Values one aggregated position against a price snapshot.
///
/// Price resolution order is realtime, then close, then the position's
/// weighted average cost. The cost fallback is the documented degraded
/// mode for tickers with no market data, tagged `PriceSource::CostBasis`
/// so callers can surface it. Passing `None` for the snapshot values the
/// position entirely in degraded mode with an FX rate of 1.
pub fn value_position(position: &Position, snapshot: Option<&PriceSnapshot>) -> ValuedPosition {
    let (realtime, close, previous_close, fx_rate) = match snapshot {
        Some(s) => (
            s.realtime_price,
            s.close_price,
            s.previous_close,
            s.fx_rate_to_base,
        ),
        None => {
            warn!(
                "No price snapshot for {}; valuing at cost basis",
                position.ticker
            );
            (None, None, None, Decimal::ONE)
        }
    };

    let (current_price, price_source) = match (realtime, close) {
        (Some(p), _) => (p, PriceSource::Realtime),
        (None, Some(p)) => (p, PriceSource::Close),
        (None, None) => (position.weighted_avg_cost, PriceSource::CostBasis),
    };

    // Headline change vs. previous close; zero when the guard trips.
    let (change, change_percent) = match previous_close.filter(|p| !p.is_zero()) {
        Some(p) => {
            let delta = current_price - p;
            (delta, percent_of(delta, p).unwrap_or(Decimal::ZERO))
        }
        None => (Decimal::ZERO, Decimal::ZERO),
    };

    // Close track: settled close vs. previous close.
    let close_change = match (close, previous_close) {
        (Some(c), Some(p)) if !p.is_zero() => Some(c - p),
        _ => None,
    };
    let close_change_percent =
        close_change.and_then(|d| previous_close.and_then(|p| percent_of(d, p)));

    // Realtime track: intraday move since the last settled close.
    let realtime_change = match (realtime, close) {
        (Some(r), Some(c)) if !c.is_zero() => Some(r - c),
        _ => None,
    };
    let realtime_change_percent =
        realtime_change.and_then(|d| close.and_then(|c| percent_of(d, c)));

    let market_value_local = current_price * position.total_shares;
    let market_value_base = market_value_local * fx_rate;
    let total_cost_basis = (position.raw_cost + position.total_buy_fee) * fx_rate;

    let costs = estimate_sell_costs(position.market, &position.ticker, market_value_local);
    let estimated_sell_cost = costs.total() * fx_rate;
    let estimated_net_proceeds = market_value_base - estimated_sell_cost;
    let unrealized_pnl = estimated_net_proceeds - total_cost_basis;
    let roi = percent_of(unrealized_pnl, total_cost_basis).unwrap_or(Decimal::ZERO);

    let strategy = thresholds(
        position.strategy_mode,
        position.weighted_avg_cost,
        position.high_watermark_price,
        position.manual_take_profit,
        position.manual_stop_loss,
    );

    ValuedPosition {
        position: position.clone(),
        current_price,
        price_source,
        fx_rate_to_base: fx_rate,
        change,
        change_percent,
        close_change,
        close_change_percent,
        realtime_change,
        realtime_change_percent,
        market_value_local,
        market_value_base,
        total_cost_basis,
        sell_commission: costs.commission,
        sell_tax: costs.tax,
        estimated_sell_cost,
        estimated_net_proceeds,
        unrealized_pnl,
        roi,
        take_profit: strategy.take_profit,
        stop_loss: strategy.stop_loss,
    }
}
