//! Threshold alerting over valued positions.
//!
//! Emits take-profit, stop-loss, and cost-zone events from the already
//! computed strategy thresholds. Pure; persisting alert history and
//! delivering notifications are the caller's concern.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::positions_model::{PriceSource, ValuedPosition};
use crate::constants::COST_ZONE_TOLERANCE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertKind {
    /// Current price at or above the take-profit threshold.
    TakeProfitTriggered,
    /// Current price at or below the stop-loss threshold.
    StopLossTriggered,
    /// Current price within the ±2% band around average cost.
    CostZoneEntered,
}

/// A triggered price alert for one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub owner_id: String,
    pub ticker: String,
    pub kind: AlertKind,
    /// The threshold that was breached.
    pub trigger_price: Decimal,
    pub current_price: Decimal,
    pub triggered_at: DateTime<Utc>,
}

/// A previously delivered alert, as recorded by the caller. Used for
/// cooldown deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAlert {
    pub owner_id: String,
    pub ticker: String,
    pub kind: AlertKind,
    pub triggered_at: DateTime<Utc>,
}

/// Checks every valued position against its TP/SL thresholds and the
/// cost zone. Positions valued in degraded mode are skipped: a price
/// equal to cost by construction would fire the cost-zone alert on
/// every cycle.
pub fn check_portfolio_alerts(owner_id: &str, holdings: &[ValuedPosition]) -> Vec<AlertEvent> {
    let tolerance: Decimal = COST_ZONE_TOLERANCE.parse().unwrap_or(Decimal::ZERO);
    let now = Utc::now();
    let mut alerts = Vec::new();

    for holding in holdings {
        if holding.price_source == PriceSource::CostBasis {
            continue;
        }
        if holding.position.total_shares <= Decimal::ZERO {
            continue;
        }
        let current = holding.current_price;
        let ticker = &holding.position.ticker;

        if current >= holding.take_profit {
            alerts.push(AlertEvent {
                owner_id: owner_id.to_string(),
                ticker: ticker.clone(),
                kind: AlertKind::TakeProfitTriggered,
                trigger_price: holding.take_profit,
                current_price: current,
                triggered_at: now,
            });
        }

        if holding.stop_loss > Decimal::ZERO && current <= holding.stop_loss {
            alerts.push(AlertEvent {
                owner_id: owner_id.to_string(),
                ticker: ticker.clone(),
                kind: AlertKind::StopLossTriggered,
                trigger_price: holding.stop_loss,
                current_price: current,
                triggered_at: now,
            });
        }

        let avg_cost = holding.position.weighted_avg_cost;
        if avg_cost > Decimal::ZERO && (current - avg_cost).abs() <= avg_cost * tolerance {
            alerts.push(AlertEvent {
                owner_id: owner_id.to_string(),
                ticker: ticker.clone(),
                kind: AlertKind::CostZoneEntered,
                trigger_price: avg_cost,
                current_price: current,
                triggered_at: now,
            });
        }
    }

    alerts
}

/// Drops alerts whose (owner, ticker, kind) was already delivered
/// within the cooldown window.
pub fn deduplicate_alerts(
    new_alerts: Vec<AlertEvent>,
    recent_alerts: &[RecentAlert],
    cooldown: Duration,
) -> Vec<AlertEvent> {
    let cutoff = Utc::now() - cooldown;
    new_alerts
        .into_iter()
        .filter(|alert| {
            !recent_alerts.iter().any(|recent| {
                recent.triggered_at > cutoff
                    && recent.owner_id == alert.owner_id
                    && recent.ticker == alert.ticker
                    && recent.kind == alert.kind
            })
        })
        .collect()
}
