use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Current time truncated to whole milliseconds, the precision timestamps are
/// persisted with. Keeping in-memory values at the same precision makes a
/// save-then-load cycle lossless.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FolderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for FolderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FolderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user-authored note.
///
/// Serializes to the persisted camelCase shape. Decoding goes through
/// [`crate::validate`] instead of `Deserialize`, so unvalidated records never
/// become a `Note`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub folder_id: Option<FolderId>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Note {
    pub fn new(title: String, content: String, folder_id: Option<FolderId>) -> Self {
        let now = now_millis();
        Self {
            id: NoteId::new(),
            title,
            content,
            folder_id,
            created_at: now,
            updated_at: now,
            tags: None,
        }
    }

    /// Advances `updated_at` to now. Never moves backwards, and moves
    /// forward by at least one millisecond unless already at the end of the
    /// representable range.
    pub fn touch(&mut self) {
        let now = now_millis();
        if now > self.updated_at {
            self.updated_at = now;
        } else if let Some(next) = self
            .updated_at
            .checked_add_signed(Duration::milliseconds(1))
        {
            self.updated_at = next;
        }
    }

    pub fn is_unfiled(&self) -> bool {
        self.folder_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Folder {
    pub fn new(name: String) -> Self {
        Self {
            id: FolderId::new(),
            name,
            created_at: now_millis(),
        }
    }
}
