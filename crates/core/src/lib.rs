//! Lotfolio Core - Portfolio valuation and position-strategy engine.
//!
//! This crate contains the accounting and strategy logic for Lotfolio:
//! lot aggregation, dual-track market valuation, trading-cost estimates,
//! trailing take-profit/stop-loss, and sell realization into an
//! append-only trade ledger. It is storage-agnostic and defines traits
//! that external collaborators (price feed, lot store, ledger) implement.

pub mod constants;
pub mod errors;
pub mod lots;
pub mod market_data;
pub mod portfolio;

// Re-export common types from the lots and portfolio modules
pub use lots::*;
pub use market_data::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
