//! # Persistence Bridge
//!
//! Mirrors the two collections to a [`KeyValueStorage`] and reads them back.
//!
//! Every write is a full snapshot of one collection under its own key. There
//! is no log and no partial update, so a failed write leaves the previous
//! snapshot intact. Reads never fail: an unreadable key is logged and
//! treated as absent, and the raw text goes through [`crate::validate`].

use crate::config::{ZealotConfig, DEFAULT_FOLDERS_KEY, DEFAULT_NOTES_KEY};
use crate::error::{Result, ZealotError};
use crate::model::{Folder, Note};
use crate::store::KeyValueStorage;
use crate::validate::{parse_folders, parse_notes};
use log::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub notes: String,
    pub folders: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            notes: DEFAULT_NOTES_KEY.to_string(),
            folders: DEFAULT_FOLDERS_KEY.to_string(),
        }
    }
}

impl From<&ZealotConfig> for StorageKeys {
    fn from(config: &ZealotConfig) -> Self {
        Self {
            notes: config.notes_key.clone(),
            folders: config.folders_key.clone(),
        }
    }
}

/// Validated collections read from storage.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
}

pub struct Persistence<B: KeyValueStorage> {
    backend: B,
    keys: StorageKeys,
}

impl<B: KeyValueStorage> Persistence<B> {
    pub fn new(backend: B, keys: StorageKeys) -> Self {
        Self { backend, keys }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load(&self) -> Snapshot {
        let raw_notes = self.read_raw(&self.keys.notes);
        let raw_folders = self.read_raw(&self.keys.folders);

        let snapshot = Snapshot {
            notes: parse_notes(raw_notes.as_deref()),
            folders: parse_folders(raw_folders.as_deref()),
        };
        info!(
            "Loaded {} notes and {} folders",
            snapshot.notes.len(),
            snapshot.folders.len()
        );
        snapshot
    }

    pub fn save_notes(&self, notes: &[Note]) -> Result<()> {
        self.write(&self.keys.notes, notes)
    }

    pub fn save_folders(&self, folders: &[Folder]) -> Result<()> {
        self.write(&self.keys.folders, folders)
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not read '{}' from storage, starting empty: {}", key, e);
                None
            }
        }
    }

    fn write<T: serde::Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records).map_err(ZealotError::Serialization)?;
        debug!("Writing {} records ({} bytes) to '{}'", records.len(), raw.len(), key);
        self.backend.set(key, &raw)
    }
}
