#[cfg(test)]
mod tests {
    use crate::lots::{Market, PurchaseLot, StrategyMode};
    use crate::portfolio::aggregate_lots;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn lot(ticker: &str, shares: Decimal, cost: Decimal, fee: Decimal, day: u32) -> PurchaseLot {
        PurchaseLot::new(
            "owner-1",
            ticker,
            Market::Local,
            shares,
            cost,
            fee,
            Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_weighted_average_cost() {
        let lots = vec![
            lot("2330", dec!(100), dec!(10), dec!(0), 1),
            lot("2330", dec!(50), dec!(13), dec!(0), 2),
        ];

        let positions = aggregate_lots(&lots);
        assert_eq!(positions.len(), 1);

        let position = &positions[0];
        assert_eq!(position.total_shares, dec!(150));
        assert_eq!(position.raw_cost, dec!(1650));
        assert_eq!(position.weighted_avg_cost, dec!(11));
        assert!(position.is_multiple);
    }

    #[test]
    fn test_groups_by_ticker_sorted() {
        let lots = vec![
            lot("2454", dec!(10), dec!(900), dec!(12), 1),
            lot("2330", dec!(5), dec!(600), dec!(4), 2),
            lot("2330", dec!(5), dec!(580), dec!(4), 3),
        ];

        let positions = aggregate_lots(&lots);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].ticker, "2330");
        assert_eq!(positions[1].ticker, "2454");
        assert_eq!(positions[0].total_buy_fee, dec!(8));
        assert!(!positions[1].is_multiple);
    }

    #[test]
    fn test_lots_ordered_most_recent_first() {
        let lots = vec![
            lot("2330", dec!(10), dec!(500), dec!(0), 5),
            lot("2330", dec!(10), dec!(520), dec!(0), 20),
            lot("2330", dec!(10), dec!(510), dec!(0), 10),
        ];

        let positions = aggregate_lots(&lots);
        let days: Vec<u32> = positions[0]
            .lots
            .iter()
            .map(|l| {
                use chrono::Datelike;
                l.acquired_at.day()
            })
            .collect();
        assert_eq!(days, vec![20, 10, 5]);
    }

    #[test]
    fn test_strategy_inputs_folded_over_group() {
        let mut older = lot("2330", dec!(10), dec!(500), dec!(0), 1);
        older.high_watermark_price = dec!(620);
        let mut newer = lot("2330", dec!(10), dec!(550), dec!(0), 2);
        newer.strategy_mode = StrategyMode::Manual;
        newer.manual_take_profit = Some(dec!(700));

        let positions = aggregate_lots(&[older, newer]);
        let position = &positions[0];

        // Mode and manual thresholds from the most recent lot, watermark
        // as the max across the group.
        assert_eq!(position.strategy_mode, StrategyMode::Manual);
        assert_eq!(position.manual_take_profit, Some(dec!(700)));
        assert_eq!(position.high_watermark_price, dec!(620));
    }

    #[test]
    fn test_zero_share_group_guarded() {
        let lots = vec![lot("2330", dec!(0), dec!(100), dec!(0), 1)];
        let positions = aggregate_lots(&lots);
        assert_eq!(positions[0].weighted_avg_cost, Decimal::ZERO);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_lots(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_share_conservation(
            shares in proptest::collection::vec(1u64..100_000, 1..20),
        ) {
            let lots: Vec<PurchaseLot> = shares
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    lot(
                        if i % 2 == 0 { "2330" } else { "0050" },
                        Decimal::from(*s),
                        dec!(100),
                        dec!(1),
                        (i % 27) as u32 + 1,
                    )
                })
                .collect();

            let positions = aggregate_lots(&lots);
            let total_in: Decimal = shares.iter().map(|s| Decimal::from(*s)).sum();
            let total_out: Decimal = positions.iter().map(|p| p.total_shares).sum();
            prop_assert_eq!(total_in, total_out);
        }
    }
}
