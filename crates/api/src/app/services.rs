use std::sync::Arc;

use bloodbank_infra::{BankConfig, BankStorage, BloodBank, StorageError};

/// The service as shared by every handler.
pub type SharedBank = Arc<BloodBank<Arc<dyn BankStorage>>>;

/// Open the configured storage and wrap it in the service.
pub fn build_bank(cfg: &BankConfig) -> Result<SharedBank, StorageError> {
    let storage = cfg.open_storage()?;
    Ok(Arc::new(BloodBank::new(storage)))
}

/// In-memory service, starting from the given state (dev/test).
pub fn in_memory_bank(state: bloodbank_infra::BankState) -> SharedBank {
    let storage: Arc<dyn BankStorage> = Arc::new(bloodbank_infra::InMemoryStorage::with_state(state));
    Arc::new(BloodBank::new(storage))
}
