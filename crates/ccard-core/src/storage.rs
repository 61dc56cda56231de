use std::sync::Mutex;

use ccard_domain::Purchase;

use crate::CoreError;

/// Read-all / write-all persistence for the purchase collection.
///
/// Implementations hold the single source of truth. There are no partial
/// writes: `save_all` replaces whatever was stored before. A stored payload
/// that cannot be decoded loads as an empty collection.
pub trait PurchaseStore: Send + Sync {
    fn load_all(&self) -> Result<Vec<Purchase>, CoreError>;
    fn save_all(&self, purchases: &[Purchase]) -> Result<(), CoreError>;
}

/// Volatile store used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryPurchaseStore {
    purchases: Mutex<Vec<Purchase>>,
}

impl MemoryPurchaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_purchases(purchases: Vec<Purchase>) -> Self {
        Self {
            purchases: Mutex::new(purchases),
        }
    }
}

impl PurchaseStore for MemoryPurchaseStore {
    fn load_all(&self) -> Result<Vec<Purchase>, CoreError> {
        self.purchases
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| CoreError::Storage("memory store poisoned".into()))
    }

    fn save_all(&self, purchases: &[Purchase]) -> Result<(), CoreError> {
        let mut guard = self
            .purchases
            .lock()
            .map_err(|_| CoreError::Storage("memory store poisoned".into()))?;
        *guard = purchases.to_vec();
        Ok(())
    }
}
