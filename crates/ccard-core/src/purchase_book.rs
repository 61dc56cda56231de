//! The purchase collection: list, add, update and remove over a full-overwrite store.

use ccard_domain::{Identifiable, MonthlyStatement, Purchase, StatementPeriod};
use tracing::debug;

use crate::{
    statement_service::StatementService,
    storage::{MemoryPurchaseStore, PurchaseStore},
    CoreError,
};

/// Owns the backing store and applies every mutation as read-modify-write.
///
/// Each call re-reads the store; each successful mutation writes the whole
/// collection back. Update and remove with an unknown id are silent no-ops
/// reported through the returned `bool`.
pub struct PurchaseBook {
    store: Box<dyn PurchaseStore>,
}

impl PurchaseBook {
    pub fn new(store: Box<dyn PurchaseStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryPurchaseStore::new()))
    }

    pub fn list(&self) -> Result<Vec<Purchase>, CoreError> {
        self.store.load_all()
    }

    pub fn get(&self, id: &str) -> Result<Option<Purchase>, CoreError> {
        Ok(self.list()?.into_iter().find(|purchase| purchase.id() == id))
    }

    /// Appends a purchase. Ids must be unique within the collection.
    pub fn add(&mut self, purchase: Purchase) -> Result<(), CoreError> {
        let mut purchases = self.list()?;
        if purchases.iter().any(|existing| existing.id() == purchase.id()) {
            return Err(CoreError::DuplicatePurchase(purchase.id));
        }
        debug!(id = %purchase.id, "adding purchase");
        purchases.push(purchase);
        self.store.save_all(&purchases)
    }

    /// Replaces the purchase with the same id. Returns `false` when absent.
    pub fn update(&mut self, purchase: Purchase) -> Result<bool, CoreError> {
        let mut purchases = self.list()?;
        let Some(slot) = purchases
            .iter_mut()
            .find(|existing| existing.id() == purchase.id())
        else {
            debug!(id = %purchase.id, "update skipped, purchase not found");
            return Ok(false);
        };
        *slot = purchase;
        self.store.save_all(&purchases)?;
        Ok(true)
    }

    /// Removes the purchase with `id`. Returns `false` when absent.
    pub fn remove(&mut self, id: &str) -> Result<bool, CoreError> {
        let purchases = self.list()?;
        let before = purchases.len();
        let remaining: Vec<Purchase> = purchases
            .into_iter()
            .filter(|purchase| purchase.id() != id)
            .collect();
        if remaining.len() == before {
            debug!(id, "remove skipped, purchase not found");
            return Ok(false);
        }
        self.store.save_all(&remaining)?;
        Ok(true)
    }

    /// Statement for `period`, recomputed from the stored collection.
    pub fn statement(&self, period: StatementPeriod) -> Result<MonthlyStatement, CoreError> {
        Ok(StatementService::statement_for(&self.list()?, period))
    }
}
