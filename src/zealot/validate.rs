//! # Validation and Migration
//!
//! The only place where raw persisted text turns into domain records. Every
//! function here is total: malformed input yields fewer records, never an
//! error, and nothing inland of this module sees an unvalidated shape.
//!
//! ## Note records
//!
//! Required: `id` (non-empty string), `title` and `content` (strings),
//! `createdAt` and `updatedAt` (numbers, milliseconds since the epoch).
//!
//! Lenient:
//! - `folderId` missing is the older schema and migrates to `null`. A value
//!   of the wrong kind is treated as unfiled.
//! - `tags` that are not a list of strings are dropped; the note is kept.
//! - `updatedAt` earlier than `createdAt` is clamped to `createdAt`.
//!
//! ## Folder records
//!
//! Required: `id` (non-empty string), `name` (string, non-blank),
//! `createdAt` (number).
//!
//! In both collections a repeated `id` keeps the first record.
//!
//! Applying the parse to its own serialized output is a no-op.

use crate::model::{Folder, FolderId, Note, NoteId};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

#[derive(Deserialize)]
#[serde(transparent)]
struct Millis(f64);

impl Millis {
    fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(self.0.trunc() as i64)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNote {
    id: String,
    title: String,
    content: String,
    #[serde(default)]
    folder_id: Option<Value>,
    created_at: Millis,
    updated_at: Millis,
    #[serde(default)]
    tags: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFolder {
    id: String,
    name: String,
    created_at: Millis,
}

/// Parses the persisted notes entry. `None` means the key was absent.
pub fn parse_notes(raw: Option<&str>) -> Vec<Note> {
    let records = parse_records(raw, "notes");
    let total = records.len();
    let mut seen = HashSet::new();
    let mut notes = Vec::with_capacity(total);

    for record in records {
        let Some(note) = note_from_value(record) else {
            continue;
        };
        if !seen.insert(note.id.clone()) {
            warn!("Dropping note with duplicate id {}", note.id);
            continue;
        }
        notes.push(note);
    }

    if notes.len() < total {
        warn!(
            "Dropped {} of {} persisted notes during validation",
            total - notes.len(),
            total
        );
    }
    notes
}

/// Parses the persisted folders entry. `None` means the key was absent.
pub fn parse_folders(raw: Option<&str>) -> Vec<Folder> {
    let records = parse_records(raw, "folders");
    let total = records.len();
    let mut seen = HashSet::new();
    let mut folders = Vec::with_capacity(total);

    for record in records {
        let Some(folder) = folder_from_value(record) else {
            continue;
        };
        if !seen.insert(folder.id.clone()) {
            warn!("Dropping folder with duplicate id {}", folder.id);
            continue;
        }
        folders.push(folder);
    }

    if folders.len() < total {
        warn!(
            "Dropped {} of {} persisted folders during validation",
            total - folders.len(),
            total
        );
    }
    folders
}

fn parse_records(raw: Option<&str>, what: &str) -> Vec<Value> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("Persisted {} entry is not a list, ignoring it", what);
            Vec::new()
        }
        Err(e) => {
            warn!("Persisted {} entry is not valid JSON ({}), ignoring it", what, e);
            Vec::new()
        }
    }
}

fn note_from_value(value: Value) -> Option<Note> {
    let stored: StoredNote = match serde_json::from_value(value) {
        Ok(stored) => stored,
        Err(e) => {
            debug!("Rejecting note record: {}", e);
            return None;
        }
    };

    if stored.id.is_empty() {
        debug!("Rejecting note record with empty id");
        return None;
    }

    let created_at = stored.created_at.to_datetime()?;
    let mut updated_at = stored.updated_at.to_datetime()?;
    if updated_at < created_at {
        debug!("Clamping updatedAt of note {} to createdAt", stored.id);
        updated_at = created_at;
    }

    let folder_id = match stored.folder_id {
        None => None,
        Some(Value::String(id)) => Some(FolderId::from(id)),
        Some(other) => {
            debug!(
                "Note {} has a non-string folderId ({}), treating as unfiled",
                stored.id, other
            );
            None
        }
    };

    let tags = match stored.tags {
        None => None,
        Some(value) => match serde_json::from_value::<Vec<String>>(value) {
            Ok(tags) => Some(tags),
            Err(_) => {
                debug!("Note {} has malformed tags, dropping them", stored.id);
                None
            }
        },
    };

    Some(Note {
        id: NoteId::from(stored.id),
        title: stored.title,
        content: stored.content,
        folder_id,
        created_at,
        updated_at,
        tags,
    })
}

fn folder_from_value(value: Value) -> Option<Folder> {
    let stored: StoredFolder = match serde_json::from_value(value) {
        Ok(stored) => stored,
        Err(e) => {
            debug!("Rejecting folder record: {}", e);
            return None;
        }
    };

    if stored.id.is_empty() || stored.name.trim().is_empty() {
        debug!("Rejecting folder record with empty id or name");
        return None;
    }

    Some(Folder {
        id: FolderId::from(stored.id),
        name: stored.name,
        created_at: stored.created_at.to_datetime()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{"id":"a","title":"A","content":"body","folderId":"f1","createdAt":1700000000000,"updatedAt":1700000000500}"#;

    #[test]
    fn absent_entry_is_empty() {
        assert!(parse_notes(None).is_empty());
        assert!(parse_folders(None).is_empty());
    }

    #[test]
    fn malformed_json_is_empty() {
        assert!(parse_notes(Some("{not json")).is_empty());
        assert!(parse_notes(Some("")).is_empty());
        assert!(parse_folders(Some("[{")).is_empty());
    }

    #[test]
    fn wrong_top_level_shape_is_empty() {
        assert!(parse_notes(Some(WELL_FORMED)).is_empty());
        assert!(parse_folders(Some("42")).is_empty());
        assert!(parse_notes(Some("null")).is_empty());
    }

    #[test]
    fn keeps_valid_drops_missing_content() {
        let raw = format!(
            r#"[{}, {{"id":"b","title":"B","createdAt":1,"updatedAt":2}}]"#,
            WELL_FORMED
        );
        let notes = parse_notes(Some(&raw));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id.as_str(), "a");
        assert_eq!(notes[0].folder_id, Some(FolderId::from("f1")));
    }

    #[test]
    fn drops_records_with_wrong_primitive_kinds() {
        let raw = r#"[
            {"id":1,"title":"A","content":"","createdAt":1,"updatedAt":1},
            {"id":"b","title":"B","content":"","createdAt":"yesterday","updatedAt":1},
            {"id":"c","title":null,"content":"","createdAt":1,"updatedAt":1},
            "just a string",
            null
        ]"#;
        assert!(parse_notes(Some(raw)).is_empty());
    }

    #[test]
    fn migrates_missing_folder_id_to_unfiled() {
        let raw = r#"[{"id":"old","title":"Old","content":"x","createdAt":10,"updatedAt":20}]"#;
        let notes = parse_notes(Some(raw));
        assert_eq!(notes.len(), 1);
        assert!(notes[0].folder_id.is_none());
    }

    #[test]
    fn migration_is_idempotent() {
        let raw = r#"[
            {"id":"old","title":"Old","content":"x","createdAt":10,"updatedAt":20},
            {"id":"new","title":"New","content":"y","folderId":null,"createdAt":30,"updatedAt":40,"tags":["t"]}
        ]"#;
        let first = parse_notes(Some(raw));
        let serialized = serde_json::to_string(&first).unwrap();
        let second = parse_notes(Some(&serialized));
        assert_eq!(first, second);
    }

    #[test]
    fn preserves_tags_and_drops_malformed_tags() {
        let raw = r#"[
            {"id":"a","title":"A","content":"","createdAt":1,"updatedAt":1,"tags":["x","y"]},
            {"id":"b","title":"B","content":"","createdAt":1,"updatedAt":1,"tags":"x"}
        ]"#;
        let notes = parse_notes(Some(raw));
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].tags, Some(vec!["x".to_string(), "y".to_string()]));
        assert_eq!(notes[1].tags, None);
    }

    #[test]
    fn non_string_folder_id_is_unfiled() {
        let raw = r#"[{"id":"a","title":"A","content":"","folderId":7,"createdAt":1,"updatedAt":1}]"#;
        let notes = parse_notes(Some(raw));
        assert_eq!(notes.len(), 1);
        assert!(notes[0].folder_id.is_none());
    }

    #[test]
    fn clamps_updated_before_created() {
        let raw = r#"[{"id":"a","title":"A","content":"","createdAt":500,"updatedAt":100}]"#;
        let notes = parse_notes(Some(raw));
        assert_eq!(notes[0].updated_at, notes[0].created_at);
        assert_eq!(notes[0].created_at.timestamp_millis(), 500);
    }

    #[test]
    fn accepts_fractional_timestamps() {
        let raw = r#"[{"id":"a","title":"A","content":"","createdAt":1.9,"updatedAt":2.5e3}]"#;
        let notes = parse_notes(Some(raw));
        assert_eq!(notes[0].created_at.timestamp_millis(), 1);
        assert_eq!(notes[0].updated_at.timestamp_millis(), 2500);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let raw = r#"[
            {"id":"a","title":"First","content":"","createdAt":1,"updatedAt":1},
            {"id":"a","title":"Second","content":"","createdAt":1,"updatedAt":1}
        ]"#;
        let notes = parse_notes(Some(raw));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "First");
    }

    #[test]
    fn empty_id_is_rejected() {
        let raw = r#"[{"id":"","title":"A","content":"","createdAt":1,"updatedAt":1}]"#;
        assert!(parse_notes(Some(raw)).is_empty());
    }

    #[test]
    fn parses_folders_and_drops_invalid() {
        let raw = r#"[
            {"id":"f1","name":"Work","createdAt":1},
            {"id":"f2","name":"   ","createdAt":1},
            {"id":"f3","createdAt":1},
            {"id":"f4","name":"Home","createdAt":"now"},
            {"id":"f1","name":"Dup","createdAt":2}
        ]"#;
        let folders = parse_folders(Some(raw));
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Work");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw = r#"[{"id":"f1","name":"Work","createdAt":1,"color":"red"}]"#;
        assert_eq!(parse_folders(Some(raw)).len(), 1);
    }
}
