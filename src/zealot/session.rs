//! # Selection and Editor Session
//!
//! Ephemeral UI state owned by the notebook state. Nothing here is persisted.
//!
//! The editor session is a small state machine:
//!
//! ```text
//!            start_new                 save
//!   Closed ───────────► CreatingNew ─────────► Editing(new id)
//!     ▲  ▲                  │ cancel
//!     │  └──────────────────┘
//!     │
//!     │ delete open note        open(id)
//!     └──────────────────── Editing(id) ◄──── Closed / Editing / CreatingNew
//! ```
//!
//! Cancelling while editing an existing note keeps it open; only unsaved
//! edits (held by the caller) are discarded.

use crate::model::{FolderId, NoteId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorSession {
    #[default]
    Closed,
    CreatingNew,
    Editing(NoteId),
}

impl EditorSession {
    pub fn start_new(&mut self) {
        *self = EditorSession::CreatingNew;
    }

    pub fn open(&mut self, id: NoteId) {
        *self = EditorSession::Editing(id);
    }

    pub fn cancel(&mut self) {
        if matches!(self, EditorSession::CreatingNew) {
            *self = EditorSession::Closed;
        }
    }

    /// Closes the session if it is editing `id`. Returns whether it did.
    pub fn close_if_editing(&mut self, id: &NoteId) -> bool {
        if self.note_id() == Some(id) {
            *self = EditorSession::Closed;
            true
        } else {
            false
        }
    }

    pub fn note_id(&self) -> Option<&NoteId> {
        match self {
            EditorSession::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_creating_new(&self) -> bool {
        matches!(self, EditorSession::CreatingNew)
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, EditorSession::Closed)
    }
}

/// Which folder is being viewed and what the editor is doing.
///
/// `folder == None` is the "All Notes" view. The two axes are independent:
/// changing folder never touches the editor session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub folder: Option<FolderId>,
    pub editor: EditorSession,
}

impl Selection {
    pub fn selected_folder_id(&self) -> Option<&FolderId> {
        self.folder.as_ref()
    }

    pub fn selected_note_id(&self) -> Option<&NoteId> {
        self.editor.note_id()
    }

    pub fn is_creating_new(&self) -> bool {
        self.editor.is_creating_new()
    }
}
