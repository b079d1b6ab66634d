use super::KeyValueStorage;
use crate::error::{Result, ZealotError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory-backed key-value storage: each key is a `<key>.json` file.
pub struct FileStorage {
    root: PathBuf,
    quota: Option<usize>,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            quota: None,
        }
    }

    pub fn with_quota(mut self, bytes: Option<usize>) -> Self {
        self.quota = bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(ZealotError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ZealotError::Io)?;
        }
        Ok(())
    }

    fn check_quota(&self, key: &str, value: &str) -> Result<()> {
        let Some(limit) = self.quota else {
            return Ok(());
        };
        let target = self.key_path(key)?;
        let mut used = 0usize;
        if self.root.exists() {
            for entry in fs::read_dir(&self.root).map_err(ZealotError::Io)? {
                let path = entry.map_err(ZealotError::Io)?.path();
                let is_entry = path.extension().is_some_and(|ext| ext == "json");
                if is_entry && path != target {
                    used += fs::metadata(&path).map_err(ZealotError::Io)?.len() as usize;
                }
            }
        }
        let needed = used + value.len();
        if needed > limit {
            return Err(ZealotError::QuotaExceeded {
                key: key.to_string(),
                needed,
                limit,
            });
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ZealotError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let target = self.key_path(key)?;
        self.check_quota(key, value)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(ZealotError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ZealotError::Io(e));
        }
        Ok(())
    }
}
