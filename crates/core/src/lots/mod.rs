//! Lots module - purchase lots, realized trades, and store traits.

mod lots_model;
mod lots_traits;
mod memory_store;

// Re-export the public interface
pub use lots_model::{
    LotTransaction, Market, PurchaseLot, RealizedTrade, StrategyMode, TradeReason,
};
pub use lots_traits::{LedgerTrait, LotStoreTrait};
pub use memory_store::{InMemoryLedger, InMemoryLotStore};
