//! Presentation helpers shared by every client: how a note is named,
//! previewed and dated in a listing.

use crate::model::Note;
use chrono::{DateTime, Utc};

pub const UNTITLED: &str = "Untitled Note";
pub const DEFAULT_PREVIEW_LENGTH: usize = 60;

pub fn display_title(note: &Note) -> &str {
    if note.title.trim().is_empty() {
        UNTITLED
    } else {
        &note.title
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// Short date, e.g. `Jan 5, 2025`.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}
