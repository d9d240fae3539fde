//! Infrastructure layer: persistence, configuration and the service that
//! wires the domain crates together.

pub mod bank;
pub mod config;
pub mod storage;

pub use bank::{BankError, BloodBank};
pub use config::{BankConfig, ConfigError, StorageKind};
pub use storage::{BankState, BankStorage, InMemoryStorage, JsonFileStorage, StorageError};
