use crate::error::{Result, ZealotError};
use crate::view::DEFAULT_PREVIEW_LENGTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_NOTES_KEY: &str = "zealot-notes";
pub const DEFAULT_FOLDERS_KEY: &str = "zealot-folders";

/// Configuration for zealot, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZealotConfig {
    /// Storage key holding the notes collection
    #[serde(default = "default_notes_key")]
    pub notes_key: String,

    /// Storage key holding the folders collection
    #[serde(default = "default_folders_key")]
    pub folders_key: String,

    /// Characters of content shown in list previews
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,

    /// Upper bound in bytes for everything written to storage
    #[serde(default)]
    pub storage_quota: Option<usize>,
}

fn default_notes_key() -> String {
    DEFAULT_NOTES_KEY.to_string()
}

fn default_folders_key() -> String {
    DEFAULT_FOLDERS_KEY.to_string()
}

fn default_preview_length() -> usize {
    DEFAULT_PREVIEW_LENGTH
}

impl Default for ZealotConfig {
    fn default() -> Self {
        Self {
            notes_key: default_notes_key(),
            folders_key: default_folders_key(),
            preview_length: default_preview_length(),
            storage_quota: None,
        }
    }
}

impl ZealotConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ZealotError::Io)?;
        let config: ZealotConfig =
            serde_json::from_str(&content).map_err(ZealotError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        self.validate()?;
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ZealotError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ZealotError::Serialization)?;
        fs::write(config_path, content).map_err(ZealotError::Io)?;
        Ok(())
    }

    /// Current value of a config key, as shown by `zealot config <key>`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "notes-key" => Some(self.notes_key.clone()),
            "folders-key" => Some(self.folders_key.clone()),
            "preview-length" => Some(self.preview_length.to_string()),
            "storage-quota" => Some(
                self.storage_quota
                    .map(|q| q.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            _ => None,
        }
    }

    /// Sets a config key from its textual form. `storage-quota none` lifts
    /// the limit.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match key {
            "notes-key" => self.notes_key = value.to_string(),
            "folders-key" => self.folders_key = value.to_string(),
            "preview-length" => {
                self.preview_length = value
                    .parse()
                    .map_err(|_| format!("Invalid preview length: {}", value))?;
            }
            "storage-quota" => {
                self.storage_quota = match value {
                    "none" => None,
                    bytes => Some(
                        bytes
                            .parse()
                            .map_err(|_| format!("Invalid storage quota: {}", bytes))?,
                    ),
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["notes-key", "folders-key", "preview-length", "storage-quota"]
    }

    fn validate(&self) -> Result<()> {
        if self.notes_key.trim().is_empty() || self.folders_key.trim().is_empty() {
            return Err(ZealotError::Config("storage keys cannot be empty".into()));
        }
        if self.notes_key == self.folders_key {
            return Err(ZealotError::Config(format!(
                "notes and folders cannot share the storage key '{}'",
                self.notes_key
            )));
        }
        Ok(())
    }
}
