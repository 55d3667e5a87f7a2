//! Lot aggregation: groups purchase lots by ticker and computes the
//! weighted cost view. Pure and deterministic; no I/O.

use std::collections::BTreeMap;

use log::warn;
use rust_decimal::Decimal;

use super::positions_model::Position;
use crate::lots::PurchaseLot;

/// Groups one owner's lots by ticker into weighted positions.
///
/// Lots inside each position are ordered by acquisition date
/// descending; the ordering is recency metadata only, not an
/// allocation order. Output is sorted by ticker for determinism.
pub fn aggregate_lots(lots: &[PurchaseLot]) -> Vec<Position> {
    let mut groups: BTreeMap<String, Vec<PurchaseLot>> = BTreeMap::new();
    for lot in lots {
        groups
            .entry(lot.ticker.clone())
            .or_default()
            .push(lot.clone());
    }

    groups
        .into_iter()
        .map(|(ticker, mut group)| {
            group.sort_by(|a, b| b.acquired_at.cmp(&a.acquired_at));

            let total_shares: Decimal = group.iter().map(|l| l.shares).sum();
            let raw_cost: Decimal = group
                .iter()
                .map(|l| l.shares * l.cost_price_per_share)
                .sum();
            let total_buy_fee: Decimal = group.iter().map(|l| l.buy_fee).sum();

            // Aggregation is never invoked with an empty group, but a
            // zero-share group can still arrive from bad data.
            let weighted_avg_cost = if total_shares.is_zero() {
                warn!("Position {} has zero total shares; average cost zeroed", ticker);
                Decimal::ZERO
            } else {
                raw_cost / total_shares
            };

            let high_watermark_price = group
                .iter()
                .map(|l| l.high_watermark_price)
                .max()
                .unwrap_or(weighted_avg_cost);

            // Most recent lot carries the strategy settings.
            let newest = &group[0];

            Position {
                ticker,
                market: newest.market,
                total_shares,
                weighted_avg_cost,
                raw_cost,
                total_buy_fee,
                is_multiple: group.len() > 1,
                strategy_mode: newest.strategy_mode,
                high_watermark_price,
                manual_take_profit: newest.manual_take_profit,
                manual_stop_loss: newest.manual_stop_loss,
                lots: group,
            }
        })
        .collect()
}
