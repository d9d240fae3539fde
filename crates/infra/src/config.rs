//! Configuration loading and representation.
//!
//! Everything comes from environment variables:
//!
//! - `BLOODBANK_STORAGE`: `file` (default) or `memory`
//! - `BLOODBANK_DB_FILE`: path of the JSON document (default `db.json`)
//! - `BLOODBANK_SEED_INVENTORY`: seed default stock on first creation (default `false`)
//! - `PORT`: listen port (default `3000`)

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use bloodbank_inventory::{default_seed, InventoryMap};

use crate::storage::{BankState, BankStorage, InMemoryStorage, JsonFileStorage, StorageError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub storage: StorageKind,
    pub db_file: PathBuf,
    pub seed_inventory: bool,
    pub port: u16,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::File,
            db_file: PathBuf::from("db.json"),
            seed_inventory: false,
            port: 3000,
        }
    }
}

impl BankConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(v) = lookup("BLOODBANK_STORAGE") {
            cfg.storage = match v.trim().to_lowercase().as_str() {
                "file" => StorageKind::File,
                "memory" => StorageKind::Memory,
                _ => return Err(invalid("BLOODBANK_STORAGE", v, "expected file or memory")),
            };
        }

        if let Some(v) = lookup("BLOODBANK_DB_FILE").filter(|v| !v.trim().is_empty()) {
            cfg.db_file = PathBuf::from(v);
        }

        if let Some(v) = lookup("BLOODBANK_SEED_INVENTORY") {
            cfg.seed_inventory = match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => return Err(invalid("BLOODBANK_SEED_INVENTORY", v, "expected true or false")),
            };
        }

        if let Some(v) = lookup("PORT") {
            cfg.port = v
                .trim()
                .parse()
                .map_err(|_| invalid("PORT", v, "expected a port number"))?;
        }

        Ok(cfg)
    }

    /// State a brand-new store starts from.
    pub fn initial_state(&self) -> BankState {
        let inventory = if self.seed_inventory {
            default_seed()
        } else {
            InventoryMap::new()
        };
        BankState::with_inventory(inventory)
    }

    /// Construct the configured storage backend.
    pub fn open_storage(&self) -> Result<Arc<dyn BankStorage>, StorageError> {
        let initial = self.initial_state();
        let storage: Arc<dyn BankStorage> = match self.storage {
            StorageKind::File => Arc::new(JsonFileStorage::open(&self.db_file, &initial)?),
            StorageKind::Memory => Arc::new(InMemoryStorage::with_state(initial)),
        };
        Ok(storage)
    }
}

fn invalid(var: &'static str, value: String, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { var, value, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<BankConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BankConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(from_pairs(&[]).unwrap(), BankConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let cfg = from_pairs(&[
            ("BLOODBANK_STORAGE", "Memory"),
            ("BLOODBANK_DB_FILE", "/tmp/bank.json"),
            ("BLOODBANK_SEED_INVENTORY", "true"),
            ("PORT", "8081"),
        ])
        .unwrap();

        assert_eq!(cfg.storage, StorageKind::Memory);
        assert_eq!(cfg.db_file, PathBuf::from("/tmp/bank.json"));
        assert!(cfg.seed_inventory);
        assert_eq!(cfg.port, 8081);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            from_pairs(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        ));
        assert!(from_pairs(&[("BLOODBANK_STORAGE", "mongo")]).is_err());
        assert!(from_pairs(&[("BLOODBANK_SEED_INVENTORY", "maybe")]).is_err());
    }

    #[test]
    fn seeded_memory_storage_starts_with_default_stock() {
        let cfg = from_pairs(&[("BLOODBANK_STORAGE", "memory"), ("BLOODBANK_SEED_INVENTORY", "1")]).unwrap();
        let storage = cfg.open_storage().unwrap();
        assert_eq!(storage.load().unwrap().inventory, default_seed());
    }

    #[test]
    fn file_storage_is_created_at_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let cfg = BankConfig {
            db_file: path.clone(),
            ..BankConfig::default()
        };

        let storage = cfg.open_storage().unwrap();
        assert!(path.exists());
        assert!(storage.load().unwrap().inventory.is_empty());
    }
}
