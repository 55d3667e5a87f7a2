//! Portfolio module - aggregation, valuation, strategy, realization,
//! and alerting.

pub mod aggregator;
pub mod alerts;
pub mod fees;
mod holdings_service;
mod positions_model;
mod realizer;
pub mod strategy;
pub mod valuation;

pub use aggregator::aggregate_lots;
pub use alerts::{check_portfolio_alerts, deduplicate_alerts, AlertEvent, AlertKind, RecentAlert};
pub use fees::{estimate_sell_costs, is_fund_class_ticker, TradingCosts};
pub use holdings_service::{HoldingsService, HoldingsServiceTrait};
pub use positions_model::{Position, PriceSource, ValuedPosition};
pub use realizer::{RealizerService, RealizerServiceTrait, SellRequest, SellTarget};
pub use strategy::{thresholds, StrategyService, StrategyServiceTrait, StrategyThresholds};
pub use valuation::value_position;

#[cfg(test)]
mod aggregator_tests;




#[cfg(test)]
mod holdings_service_tests;

#[cfg(test)]
mod alerts_tests;
