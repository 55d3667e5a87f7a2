#[cfg(test)]
mod tests {
    use crate::errors::Result;
    use crate::lots::{InMemoryLotStore, Market, PurchaseLot};
    use crate::market_data::{PriceFeedTrait, PriceSnapshot};
    use crate::portfolio::{HoldingsService, HoldingsServiceTrait, PriceSource};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Arc;

    // --- Mock PriceFeed ---
    #[derive(Default)]
    struct MockPriceFeed {
        snapshots: HashMap<String, PriceSnapshot>,
    }

    impl MockPriceFeed {
        fn with_realtime(mut self, ticker: &str, price: Decimal, fx: Decimal) -> Self {
            let mut snapshot = PriceSnapshot::new(ticker, fx);
            snapshot.realtime_price = Some(price);
            self.snapshots.insert(ticker.to_string(), snapshot);
            self
        }
    }

    #[async_trait]
    impl PriceFeedTrait for MockPriceFeed {
        async fn get_snapshot(&self, ticker: &str) -> Result<PriceSnapshot> {
            self.snapshots
                .get(ticker)
                .cloned()
                .ok_or_else(|| crate::Error::PriceFeed(format!("no data for {}", ticker)))
        }

        async fn get_snapshots(
            &self,
            tickers: &[String],
        ) -> Result<HashMap<String, PriceSnapshot>> {
            Ok(tickers
                .iter()
                .filter_map(|t| self.snapshots.get(t).map(|s| (t.clone(), s.clone())))
                .collect())
        }
    }

    fn lot(ticker: &str, market: Market, shares: Decimal, cost: Decimal) -> PurchaseLot {
        PurchaseLot::new(
            "owner-1",
            ticker,
            market,
            shares,
            cost,
            dec!(0),
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_get_holdings_values_all_positions() {
        let store = Arc::new(InMemoryLotStore::with_lots(vec![
            lot("2330", Market::Local, dec!(100), dec!(500)),
            lot("AAPL", Market::Foreign, dec!(10), dec!(90)),
        ]));
        let feed = Arc::new(
            MockPriceFeed::default()
                .with_realtime("2330", dec!(600), dec!(1))
                .with_realtime("AAPL", dec!(100), dec!(32.5)),
        );
        let service = HoldingsService::new(store, feed);

        let holdings = service.get_holdings("owner-1").await.unwrap();
        assert_eq!(holdings.len(), 2);

        let local = holdings.iter().find(|h| h.position.ticker == "2330").unwrap();
        assert_eq!(local.market_value_base, dec!(60000));

        let foreign = holdings.iter().find(|h| h.position.ticker == "AAPL").unwrap();
        assert_eq!(foreign.market_value_base, dec!(32500));
        assert_eq!(foreign.estimated_sell_cost, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_missing_snapshot_degrades_not_drops() {
        let store = Arc::new(InMemoryLotStore::with_lots(vec![lot(
            "6957",
            Market::Local,
            dec!(100),
            dec!(80),
        )]));
        let feed = Arc::new(MockPriceFeed::default());
        let service = HoldingsService::new(store, feed);

        let holdings = service.get_holdings("owner-1").await.unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].price_source, PriceSource::CostBasis);
        assert_eq!(holdings[0].current_price, dec!(80));
    }

    #[tokio::test]
    async fn test_no_lots_no_holdings() {
        let store = Arc::new(InMemoryLotStore::new());
        let feed = Arc::new(MockPriceFeed::default());
        let service = HoldingsService::new(store, feed);

        assert!(service.get_holdings("owner-1").await.unwrap().is_empty());
    }
}
