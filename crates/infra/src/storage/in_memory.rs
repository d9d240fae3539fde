use std::sync::RwLock;

use super::{BankState, BankStorage, StorageError};

/// In-memory storage.
///
/// Intended for tests/dev; state is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    state: RwLock<BankState>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: BankState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

impl BankStorage for InMemoryStorage {
    fn load(&self) -> Result<BankState, StorageError> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        Ok(state.clone())
    }

    fn save(&self, state: &BankState) -> Result<(), StorageError> {
        let mut current = self.state.write().unwrap_or_else(|e| e.into_inner());
        *current = state.clone();
        Ok(())
    }
}
