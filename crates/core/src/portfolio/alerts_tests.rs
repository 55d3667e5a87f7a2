#[cfg(test)]
mod tests {
    use crate::lots::{Market, PurchaseLot};
    use crate::market_data::PriceSnapshot;
    use crate::portfolio::{
        aggregate_lots, check_portfolio_alerts, deduplicate_alerts, value_position, AlertKind,
        RecentAlert, ValuedPosition,
    };
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn valued(ticker: &str, cost: Decimal, current: Option<Decimal>) -> ValuedPosition {
        let lot = PurchaseLot::new(
            "owner-1",
            ticker,
            Market::Local,
            dec!(100),
            cost,
            dec!(0),
            Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap(),
        );
        let position = aggregate_lots(&[lot]).remove(0);
        let mut snapshot = PriceSnapshot::new(ticker, dec!(1));
        snapshot.realtime_price = current;
        value_position(&position, Some(&snapshot))
    }

    #[test]
    fn test_take_profit_triggered() {
        // Cost 100, auto mode: tp = 110. Price 112 trips it.
        let holdings = vec![valued("2330", dec!(100), Some(dec!(112)))];
        let alerts = check_portfolio_alerts("owner-1", &holdings);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::TakeProfitTriggered);
        assert_eq!(alerts[0].trigger_price, dec!(110));
        assert_eq!(alerts[0].current_price, dec!(112));
    }

    #[test]
    fn test_stop_loss_and_cost_zone_together() {
        // Price 99 is at or below breakeven and inside the ±2% band.
        let holdings = vec![valued("2330", dec!(100), Some(dec!(99)))];
        let alerts = check_portfolio_alerts("owner-1", &holdings);
        let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
        assert!(kinds.contains(&AlertKind::StopLossTriggered));
        assert!(kinds.contains(&AlertKind::CostZoneEntered));
    }

    #[test]
    fn test_no_alert_between_thresholds() {
        // Price 105: above cost zone, below tp, above sl.
        let holdings = vec![valued("2330", dec!(100), Some(dec!(105)))];
        assert!(check_portfolio_alerts("owner-1", &holdings).is_empty());
    }

    #[test]
    fn test_degraded_positions_skipped() {
        // No market price: valuation falls back to cost, which would
        // sit in the cost zone forever.
        let holdings = vec![valued("2330", dec!(100), None)];
        assert!(check_portfolio_alerts("owner-1", &holdings).is_empty());
    }

    #[test]
    fn test_cooldown_deduplication() {
        let holdings = vec![valued("2330", dec!(100), Some(dec!(112)))];
        let alerts = check_portfolio_alerts("owner-1", &holdings);

        let recent = vec![RecentAlert {
            owner_id: "owner-1".to_string(),
            ticker: "2330".to_string(),
            kind: AlertKind::TakeProfitTriggered,
            triggered_at: Utc::now() - Duration::minutes(10),
        }];

        let filtered = deduplicate_alerts(alerts.clone(), &recent, Duration::minutes(60));
        assert!(filtered.is_empty());

        // Outside the cooldown window the alert fires again.
        let stale = vec![RecentAlert {
            triggered_at: Utc::now() - Duration::minutes(90),
            ..recent[0].clone()
        }];
        let filtered = deduplicate_alerts(alerts, &stale, Duration::minutes(60));
        assert_eq!(filtered.len(), 1);
    }
}
