use super::KeyValueStorage;
use crate::error::{Result, ZealotError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key-value storage.
///
/// Uses `RefCell` for interior mutability since the notebook is
/// single-threaded, so `KeyValueStorage` can take `&self` everywhere.
#[derive(Default)]
pub struct MemStorage {
    entries: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the total bytes (keys plus values) the storage will hold.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Bytes used if `key` held `value` instead of its current contents.
    fn usage_with(&self, key: &str, value: &str) -> usize {
        let entries = self.entries.borrow();
        let others: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

impl KeyValueStorage for MemStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ZealotError::Storage("Simulated write error".to_string()));
        }
        if let Some(limit) = self.quota {
            let needed = self.usage_with(key, value);
            if needed > limit {
                return Err(ZealotError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::api::NotebookApi;
    use crate::model::{FolderId, NoteId};
    use crate::persist::StorageKeys;

    pub struct NotebookFixture {
        pub api: NotebookApi<MemStorage>,
    }

    impl Default for NotebookFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl NotebookFixture {
        pub fn new() -> Self {
            Self {
                api: NotebookApi::open(MemStorage::new(), StorageKeys::default()),
            }
        }

        pub fn with_folder(mut self, name: &str) -> Self {
            self.api.create_folder(name);
            self
        }

        /// Creates a note inside `folder` (by name), or unfiled when `None`.
        pub fn with_note(mut self, title: &str, folder: Option<&str>) -> Self {
            let folder_id = folder.map(|name| self.folder_id(name));
            self.api.select_folder(folder_id.as_ref());
            self.api.start_new_note();
            self.api.save_note(title, &format!("Content for {}", title));
            self.api.select_folder(None);
            self
        }

        pub fn folder_id(&self, name: &str) -> FolderId {
            self.api
                .folders()
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.id.clone())
                .unwrap_or_else(|| panic!("no folder named {}", name))
        }

        pub fn note_id(&self, title: &str) -> NoteId {
            self.api
                .notes()
                .iter()
                .find(|n| n.title == title)
                .map(|n| n.id.clone())
                .unwrap_or_else(|| panic!("no note titled {}", title))
        }
    }
}
