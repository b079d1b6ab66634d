//! # Commands
//!
//! Each command is a plain function over [`NotebookState`] that applies one
//! atomic mutation and reports what it did. Commands never fail: arguments
//! that name a missing id or an empty name are no-ops, reported with an
//! `Info` message and no `changes`.
//!
//! [`config`] is the exception: it reads and writes `config.json` directly.
//!
//! Commands know nothing about persistence. The API layer reads
//! [`CmdResult::changes`] to decide which collections to write back.
//!
//! [`NotebookState`]: crate::state::NotebookState

use crate::model::{Folder, Note};

pub mod config;
pub mod editor;
pub mod folders;
pub mod notes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Which persisted collections a command touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub notes: bool,
    pub folders: bool,
}

impl Changes {
    pub fn any(&self) -> bool {
        self.notes || self.folders
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub changes: Changes,
    pub affected_notes: Vec<Note>,
    pub affected_folders: Vec<Folder>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn noop(reason: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_message(CmdMessage::info(reason));
        result
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_affected_folders(mut self, folders: Vec<Folder>) -> Self {
        self.affected_folders = folders;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
