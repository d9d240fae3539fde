//! Persistence of the whole blood bank state as one document.

pub mod in_memory;
pub mod json_file;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bloodbank_donors::Donor;
use bloodbank_inventory::InventoryMap;
use bloodbank_requests::BloodRequest;

pub use in_memory::InMemoryStorage;
pub use json_file::JsonFileStorage;

/// Everything the service persists: donor list, request list, inventory map.
///
/// Both lists are kept most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankState {
    #[serde(default)]
    pub donors: Vec<Donor>,
    #[serde(default)]
    pub requests: Vec<BloodRequest>,
    #[serde(default)]
    pub inventory: InventoryMap,
}

impl BankState {
    /// Empty lists with the given starting stock.
    pub fn with_inventory(inventory: InventoryMap) -> Self {
        Self {
            inventory,
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Whole-document storage backend.
///
/// Every mutation rewrites the full state; there is no incremental persistence.
pub trait BankStorage: Send + Sync {
    fn load(&self) -> Result<BankState, StorageError>;
    fn save(&self, state: &BankState) -> Result<(), StorageError>;
}

impl<S> BankStorage for Arc<S>
where
    S: BankStorage + ?Sized,
{
    fn load(&self) -> Result<BankState, StorageError> {
        (**self).load()
    }

    fn save(&self, state: &BankState) -> Result<(), StorageError> {
        (**self).save(state)
    }
}
