//! Lot store and ledger traits.
//!
//! These traits define the persistence contract without any
//! database-specific types, allowing for different storage
//! implementations. The engine only ever mutates lots through them.

use async_trait::async_trait;

use super::lots_model::{LotTransaction, PurchaseLot, RealizedTrade};
use crate::errors::Result;

/// Trait defining the contract for purchase-lot persistence.
///
/// All reads are owner-scoped; the caller supplies the owner identity.
#[async_trait]
pub trait LotStoreTrait: Send + Sync {
    /// Lists all open lots for an owner.
    fn list_lots(&self, owner_id: &str) -> Result<Vec<PurchaseLot>>;

    /// Retrieves a single lot by id.
    fn get_lot(&self, lot_id: &str) -> Result<PurchaseLot>;

    /// Inserts or updates one lot. Updates are version-checked; the
    /// stored version is bumped on success.
    async fn upsert_lot(&self, lot: PurchaseLot) -> Result<PurchaseLot>;

    /// Deletes a lot by id.
    async fn delete_lot(&self, lot_id: &str) -> Result<()>;

    /// Applies a batch of updates and deletes as a single atomic
    /// read-modify-write transaction. Either every mutation is applied
    /// or none is; a stale version fails the whole batch with
    /// [`crate::errors::StoreError::ConcurrentModification`].
    async fn apply(&self, owner_id: &str, tx: LotTransaction) -> Result<()>;
}

/// Trait defining the contract for the realized-trade ledger.
///
/// The ledger is append-only: no update or delete is exposed to the
/// engine.
#[async_trait]
pub trait LedgerTrait: Send + Sync {
    /// Appends one realized trade.
    async fn append_realized_trade(&self, trade: RealizedTrade) -> Result<RealizedTrade>;

    /// Lists realized trades for an owner, most recent first.
    fn list_trades(&self, owner_id: &str) -> Result<Vec<RealizedTrade>>;
}
