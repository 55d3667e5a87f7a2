//! In-memory reference implementations of the lot store and ledger.
//!
//! Used by the test suite and by embedders that keep lots in process.
//! A single `RwLock` over the lot map gives the atomic read-modify-write
//! semantics the engine requires: a transaction validates every version
//! under the write lock before any mutation is applied.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;

use super::lots_model::{LotTransaction, PurchaseLot, RealizedTrade};
use super::lots_traits::{LedgerTrait, LotStoreTrait};
use crate::errors::{Error, Result, StoreError};

#[derive(Default)]
pub struct InMemoryLotStore {
    lots: RwLock<HashMap<String, PurchaseLot>>,
}

impl InMemoryLotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with lots, preserving their versions.
    pub fn with_lots(lots: Vec<PurchaseLot>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.lots.write().expect("lot store lock poisoned");
            for lot in lots {
                guard.insert(lot.id.clone(), lot);
            }
        }
        store
    }

    fn check_version(stored: &PurchaseLot, incoming: &PurchaseLot) -> Result<()> {
        if stored.version != incoming.version {
            return Err(StoreError::ConcurrentModification {
                lot_id: incoming.id.clone(),
                expected_version: incoming.version,
                actual_version: stored.version,
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl LotStoreTrait for InMemoryLotStore {
    fn list_lots(&self, owner_id: &str) -> Result<Vec<PurchaseLot>> {
        let guard = self
            .lots
            .read()
            .map_err(|e| Error::Store(StoreError::Internal(e.to_string())))?;
        Ok(guard
            .values()
            .filter(|lot| lot.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn get_lot(&self, lot_id: &str) -> Result<PurchaseLot> {
        let guard = self
            .lots
            .read()
            .map_err(|e| Error::Store(StoreError::Internal(e.to_string())))?;
        guard
            .get(lot_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("lot {}", lot_id)).into())
    }

    async fn upsert_lot(&self, mut lot: PurchaseLot) -> Result<PurchaseLot> {
        let mut guard = self
            .lots
            .write()
            .map_err(|e| Error::Store(StoreError::Internal(e.to_string())))?;
        if let Some(stored) = guard.get(&lot.id) {
            Self::check_version(stored, &lot)?;
            lot.version += 1;
        }
        guard.insert(lot.id.clone(), lot.clone());
        Ok(lot)
    }

    async fn delete_lot(&self, lot_id: &str) -> Result<()> {
        let mut guard = self
            .lots
            .write()
            .map_err(|e| Error::Store(StoreError::Internal(e.to_string())))?;
        guard
            .remove(lot_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("lot {}", lot_id)).into())
    }

    async fn apply(&self, owner_id: &str, tx: LotTransaction) -> Result<()> {
        if tx.is_empty() {
            return Ok(());
        }
        let mut guard = self
            .lots
            .write()
            .map_err(|e| Error::Store(StoreError::Internal(e.to_string())))?;

        // Validate everything before touching anything.
        for update in &tx.updates {
            match guard.get(&update.id) {
                Some(stored) => Self::check_version(stored, update)?,
                None => return Err(StoreError::NotFound(format!("lot {}", update.id)).into()),
            }
        }
        for lot_id in &tx.deletes {
            if !guard.contains_key(lot_id) {
                return Err(StoreError::NotFound(format!("lot {}", lot_id)).into());
            }
        }

        let update_count = tx.updates.len();
        let delete_count = tx.deletes.len();
        for mut update in tx.updates {
            update.version += 1;
            guard.insert(update.id.clone(), update);
        }
        for lot_id in tx.deletes {
            guard.remove(&lot_id);
        }
        debug!(
            "Applied lot transaction for owner {}: {} updates, {} deletes",
            owner_id, update_count, delete_count
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryLedger {
    trades: RwLock<Vec<RealizedTrade>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerTrait for InMemoryLedger {
    async fn append_realized_trade(&self, trade: RealizedTrade) -> Result<RealizedTrade> {
        let mut guard = self
            .trades
            .write()
            .map_err(|e| Error::Store(StoreError::Internal(e.to_string())))?;
        guard.push(trade.clone());
        Ok(trade)
    }

    fn list_trades(&self, owner_id: &str) -> Result<Vec<RealizedTrade>> {
        let guard = self
            .trades
            .read()
            .map_err(|e| Error::Store(StoreError::Internal(e.to_string())))?;
        let mut trades: Vec<RealizedTrade> = guard
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        trades.sort_by(|a, b| b.realized_at.cmp(&a.realized_at));
        Ok(trades)
    }
}
