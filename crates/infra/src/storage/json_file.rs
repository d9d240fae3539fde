//! JSON-file storage backend.
//!
//! The whole state lives in a single pretty-printed document with three
//! top-level fields (`donors`, `requests`, `inventory`) and is rewritten on
//! every mutation.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::{BankState, BankStorage, StorageError};

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Open the document at `path`, creating it with `initial` if it does not exist yet.
    ///
    /// An existing file is left untouched, so `initial` only applies on first creation.
    pub fn open(path: impl Into<PathBuf>, initial: &BankState) -> Result<Self, StorageError> {
        let storage = Self { path: path.into() };
        if !storage.path.exists() {
            tracing::info!(path = %storage.path.display(), "creating blood bank document");
            storage.save(initial)?;
        }
        Ok(storage)
    }
}

impl BankStorage for JsonFileStorage {
    fn load(&self) -> Result<BankState, StorageError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, state: &BankState) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        // Replace atomically: write a sibling temp file, then rename over the document.
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            serde_json::to_writer_pretty(&mut file, state)?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
