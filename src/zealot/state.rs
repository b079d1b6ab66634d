//! # Notebook State
//!
//! The authoritative in-memory owner of notes, folders and selection. Fields
//! are crate-private: outside code reads through the query methods here and
//! mutates only through [`crate::commands`].
//!
//! Folder membership is never stored on the folder. It is derived by scanning
//! notes for a matching `folder_id`.
//!
//! Notes are kept most-recent-first: new notes are inserted at the front and
//! the vector order is the display order.

use crate::model::{Folder, FolderId, Note, NoteId};
use crate::session::Selection;
use log::warn;
use std::collections::{HashMap, HashSet};

/// Which notes a listing should include.
///
/// `All` and `Unfiled` are distinct variants, so no folder id can ever be
/// mistaken for either of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NoteFilter {
    #[default]
    All,
    Unfiled,
    Folder(FolderId),
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            NoteFilter::All => true,
            NoteFilter::Unfiled => note.folder_id.is_none(),
            NoteFilter::Folder(id) => note.folder_id.as_ref() == Some(id),
        }
    }
}

impl From<Option<FolderId>> for NoteFilter {
    fn from(folder: Option<FolderId>) -> Self {
        match folder {
            Some(id) => NoteFilter::Folder(id),
            None => NoteFilter::Unfiled,
        }
    }
}

/// Per-folder note counts, recomputed on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCounts {
    pub unfiled: usize,
    pub by_folder: HashMap<FolderId, usize>,
}

impl NoteCounts {
    pub fn for_folder(&self, id: &FolderId) -> usize {
        self.by_folder.get(id).copied().unwrap_or(0)
    }

    /// The "All Notes" badge: the sum over every bucket.
    pub fn total(&self) -> usize {
        self.unfiled + self.by_folder.values().sum::<usize>()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotebookState {
    pub(crate) notes: Vec<Note>,
    pub(crate) folders: Vec<Folder>,
    pub(crate) selection: Selection,
}

impl NotebookState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds state from validated collections.
    ///
    /// Notes that point at a folder not present in `folders` are moved to
    /// unfiled. Returns the state and how many notes were reconciled.
    pub fn seeded(mut notes: Vec<Note>, folders: Vec<Folder>) -> (Self, usize) {
        let known: HashSet<&FolderId> = folders.iter().map(|f| &f.id).collect();
        let mut reconciled = 0;

        for note in &mut notes {
            let dangling = matches!(&note.folder_id, Some(id) if !known.contains(id));
            if dangling {
                warn!(
                    "Note {} references missing folder {}, moving it to unfiled",
                    note.id,
                    note.folder_id.as_ref().map(|f| f.as_str()).unwrap_or_default()
                );
                note.folder_id = None;
                reconciled += 1;
            }
        }

        let state = Self {
            notes,
            folders,
            selection: Selection::default(),
        };
        (state, reconciled)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    pub fn notes_in(&self, filter: &NoteFilter) -> Vec<&Note> {
        self.notes.iter().filter(|n| filter.matches(n)).collect()
    }

    /// Notes shown for the current folder selection ("All Notes" when none).
    pub fn visible_notes(&self) -> Vec<&Note> {
        let filter = match &self.selection.folder {
            Some(id) => NoteFilter::Folder(id.clone()),
            None => NoteFilter::All,
        };
        self.notes_in(&filter)
    }

    pub fn note_counts(&self) -> NoteCounts {
        let mut counts = NoteCounts::default();
        for note in &self.notes {
            match &note.folder_id {
                Some(id) => *counts.by_folder.entry(id.clone()).or_insert(0) += 1,
                None => counts.unfiled += 1,
            }
        }
        counts
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selection.selected_note_id().and_then(|id| self.note(id))
    }

    pub(crate) fn note_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| &n.id == id)
    }

    pub(crate) fn folder_mut(&mut self, id: &FolderId) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| &f.id == id)
    }
}
