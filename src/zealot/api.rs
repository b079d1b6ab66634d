//! # API Facade
//!
//! [`NotebookApi`] is the single entry point a client (the CLI, a GUI, tests)
//! talks to. It owns the notebook state and the persistence bridge.
//!
//! ## Commands and queries
//!
//! - **Commands** (`create_folder`, `save_note`, ...) dispatch to
//!   [`crate::commands`], then write back whichever collections the command
//!   changed. They return a [`CmdResult`] and never fail.
//! - **Queries** (`notes_in`, `note_counts`, `selected_note`, ...) are
//!   computed from current state on every call.
//!
//! ## Degraded persistence
//!
//! A failed write does not roll back memory. The command's result carries a
//! `Warning` message and [`NotebookApi::persistence_degraded`] reports the
//! last failure until a later write succeeds. The notebook stays usable.
//!
//! ## Generic over KeyValueStorage
//!
//! - Production: `NotebookApi<FileStorage>`
//! - Testing: `NotebookApi<MemStorage>`

use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::{Result, ZealotError};
use crate::model::{Folder, FolderId, Note, NoteId};
use crate::persist::{Persistence, StorageKeys};
use crate::session::{EditorSession, Selection};
use crate::state::{NoteCounts, NoteFilter, NotebookState};
use crate::store::KeyValueStorage;
use log::{debug, warn};

pub use crate::commands::{Changes, MessageLevel};

pub struct NotebookApi<B: KeyValueStorage> {
    state: NotebookState,
    persistence: Persistence<B>,
    degraded: Option<String>,
}

impl<B: KeyValueStorage> NotebookApi<B> {
    /// Loads both collections from `backend` and seeds the notebook.
    pub fn open(backend: B, keys: StorageKeys) -> Self {
        let mut api = Self {
            state: NotebookState::new(),
            persistence: Persistence::new(backend, keys),
            degraded: None,
        };
        api.reload();
        api
    }

    /// Re-reads storage and replaces in-memory state. Selection is reset.
    pub fn reload(&mut self) {
        let snapshot = self.persistence.load();
        let (state, reconciled) = NotebookState::seeded(snapshot.notes, snapshot.folders);
        self.state = state;

        if reconciled > 0 {
            let mut result = CmdResult::default();
            result.changes.notes = true;
            self.flush(&mut result);
        }
    }

    // --- Folder commands ---

    pub fn create_folder(&mut self, name: &str) -> CmdResult {
        let result = commands::folders::create(&mut self.state, name);
        self.persisted(result)
    }

    pub fn rename_folder(&mut self, id: &FolderId, new_name: &str) -> CmdResult {
        let result = commands::folders::rename(&mut self.state, id, new_name);
        self.persisted(result)
    }

    pub fn delete_folder(&mut self, id: &FolderId) -> CmdResult {
        let result = commands::folders::delete(&mut self.state, id);
        self.persisted(result)
    }

    pub fn select_folder(&mut self, id: Option<&FolderId>) -> CmdResult {
        commands::folders::select(&mut self.state, id)
    }

    // --- Editor commands ---

    pub fn start_new_note(&mut self) -> CmdResult {
        commands::editor::start_new(&mut self.state)
    }

    pub fn select_note(&mut self, id: &NoteId) -> CmdResult {
        commands::editor::select_note(&mut self.state, id)
    }

    pub fn cancel_edit(&mut self) -> CmdResult {
        commands::editor::cancel(&mut self.state)
    }

    // --- Note commands ---

    pub fn save_note(&mut self, title: &str, content: &str) -> CmdResult {
        let result = commands::notes::save(&mut self.state, title, content);
        self.persisted(result)
    }

    pub fn delete_note(&mut self, id: &NoteId) -> CmdResult {
        let result = commands::notes::delete(&mut self.state, id);
        self.persisted(result)
    }

    pub fn move_note(&mut self, id: &NoteId, folder: Option<&FolderId>) -> CmdResult {
        let result = commands::notes::move_to(&mut self.state, id, folder);
        self.persisted(result)
    }

    // --- Queries ---

    pub fn notes(&self) -> &[Note] {
        self.state.notes()
    }

    pub fn folders(&self) -> &[Folder] {
        self.state.folders()
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.state.note(id)
    }

    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.state.folder(id)
    }

    pub fn notes_in(&self, filter: &NoteFilter) -> Vec<&Note> {
        self.state.notes_in(filter)
    }

    pub fn visible_notes(&self) -> Vec<&Note> {
        self.state.visible_notes()
    }

    pub fn note_counts(&self) -> NoteCounts {
        self.state.note_counts()
    }

    pub fn selection(&self) -> &Selection {
        self.state.selection()
    }

    pub fn editor(&self) -> &EditorSession {
        &self.state.selection().editor
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.state.selected_note()
    }

    /// The last storage write failure, if the most recent write failed.
    pub fn persistence_degraded(&self) -> Option<&str> {
        self.degraded.as_deref()
    }

    pub fn persistence(&self) -> &Persistence<B> {
        &self.persistence
    }

    /// Resolves a full id or a unique prefix of one.
    pub fn resolve_note_id(&self, input: &str) -> Result<NoteId> {
        let ids = self.state.notes().iter().map(|n| n.id.as_str());
        resolve_prefix(input, ids, "note").map(NoteId::from)
    }

    /// Resolves a full id or a unique prefix of one.
    pub fn resolve_folder_id(&self, input: &str) -> Result<FolderId> {
        let ids = self.state.folders().iter().map(|f| f.id.as_str());
        resolve_prefix(input, ids, "folder").map(FolderId::from)
    }

    fn persisted(&mut self, mut result: CmdResult) -> CmdResult {
        self.flush(&mut result);
        result
    }

    /// Writes every collection the command changed.
    ///
    /// Folders go first: if the notes write then fails, notes pointing at a
    /// removed folder are reconciled to unfiled on the next load.
    fn flush(&mut self, result: &mut CmdResult) {
        if !result.changes.any() {
            return;
        }

        let mut failure = None;
        if result.changes.folders {
            if let Err(e) = self.persistence.save_folders(self.state.folders()) {
                failure = Some(e);
            }
        }
        if result.changes.notes {
            if let Err(e) = self.persistence.save_notes(self.state.notes()) {
                failure = Some(e);
            }
        }

        match failure {
            None => {
                debug!("Persisted changes {:?}", result.changes);
                self.degraded = None;
            }
            Some(e) => {
                warn!("Failed to persist changes: {}", e);
                result.add_message(CmdMessage::warning(format!(
                    "Changes may not be saved: {}",
                    e
                )));
                self.degraded = Some(e.to_string());
            }
        }
    }
}

fn resolve_prefix<'a>(
    input: &str,
    ids: impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ZealotError::Api(format!("Empty {} id", what)));
    }

    let mut matches = Vec::new();
    for id in ids {
        if id == input {
            return Ok(id.to_string());
        }
        if id.starts_with(input) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [] => Err(ZealotError::Api(format!("No {} matches '{}'", what, input))),
        [only] => Ok(only.to_string()),
        _ => Err(ZealotError::Api(format!(
            "'{}' matches {} {}s, use a longer prefix",
            input,
            matches.len(),
            what
        ))),
    }
}
