//! Round-trip trading-cost table.
//!
//! Local-market sells pay a commission (rate with a floor) plus a
//! transaction tax whose rate depends on the instrument class:
//! fund-class tickers (ETF-style numeric codes with a reserved leading
//! zero, e.g. "0050", "00878", "00991A") are taxed at 0.1%, standard
//! equities at 0.3%. Foreign markets default to zero commission and tax;
//! the table is the extension point for per-broker schedules.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::{
    LOCAL_COMMISSION_RATE, LOCAL_MIN_COMMISSION, LOCAL_TAX_RATE_EQUITY, LOCAL_TAX_RATE_FUND,
};
use crate::lots::Market;

lazy_static! {
    /// Fund-class ticker codes: leading reserved digit 0, 3-5 digits in
    /// total, optionally suffixed by one letter.
    static ref FUND_CODE_REGEX: Regex =
        Regex::new(r"^0\d{2,4}[A-Za-z]?$").expect("invalid fund code regex");
}

/// Estimated exit costs in the market's local currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TradingCosts {
    pub commission: Decimal,
    pub tax: Decimal,
}

impl TradingCosts {
    pub fn total(&self) -> Decimal {
        self.commission + self.tax
    }
}

/// Returns true when `ticker` matches the fund-class code pattern.
pub fn is_fund_class_ticker(ticker: &str) -> bool {
    FUND_CODE_REGEX.is_match(ticker)
}

fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Estimates the commission and tax for selling `market_value_local`
/// worth of `ticker` on `market`.
pub fn estimate_sell_costs(market: Market, ticker: &str, market_value_local: Decimal) -> TradingCosts {
    match market {
        Market::Local => {
            let commission_rate: Decimal =
                LOCAL_COMMISSION_RATE.parse().unwrap_or(Decimal::ZERO);
            let min_commission: Decimal =
                LOCAL_MIN_COMMISSION.parse().unwrap_or(Decimal::ZERO);
            let tax_rate: Decimal = if is_fund_class_ticker(ticker) {
                LOCAL_TAX_RATE_FUND.parse().unwrap_or(Decimal::ZERO)
            } else {
                LOCAL_TAX_RATE_EQUITY.parse().unwrap_or(Decimal::ZERO)
            };

            let commission =
                round_currency(market_value_local * commission_rate).max(min_commission);
            let tax = round_currency(market_value_local * tax_rate);
            TradingCosts { commission, tax }
        }
        // Documented default, not an omission: foreign brokers vary and
        // the caller gets zero until a schedule is added here.
        Market::Foreign => TradingCosts::default(),
    }
}
