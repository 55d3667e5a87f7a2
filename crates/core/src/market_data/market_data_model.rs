//! Market data domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time price and FX data for one ticker.
///
/// `realtime_price` is absent when the market is closed; `close_price`
/// and `previous_close` may be absent for newly listed or stale
/// tickers. Valuation degrades through the documented fallback chain
/// rather than failing when prices are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub ticker: String,
    pub realtime_price: Option<Decimal>,
    pub close_price: Option<Decimal>,
    pub previous_close: Option<Decimal>,
    /// Conversion rate from the ticker's local currency to the base
    /// currency. 1.0 for base-currency markets.
    pub fx_rate_to_base: Decimal,
    pub sector: Option<String>,
}

impl PriceSnapshot {
    pub fn new(ticker: impl Into<String>, fx_rate_to_base: Decimal) -> Self {
        PriceSnapshot {
            ticker: ticker.into(),
            realtime_price: None,
            close_price: None,
            previous_close: None,
            fx_rate_to_base,
            sector: None,
        }
    }
}
