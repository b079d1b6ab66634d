use crate::commands::{CmdMessage, CmdResult};
use crate::model::{FolderId, Note, NoteId};
use crate::session::EditorSession;
use crate::state::NotebookState;
use log::debug;

/// Saves the editor contents.
///
/// Editing an existing note updates its title and content. Composing a new
/// note inserts it at the front, inside the currently viewed folder, and
/// opens it. A closed editor or blank title and content is a no-op.
pub fn save(state: &mut NotebookState, title: &str, content: &str) -> CmdResult {
    if title.trim().is_empty() && content.trim().is_empty() {
        return CmdResult::noop("Nothing to save: title and content are empty");
    }

    match state.selection.editor.clone() {
        EditorSession::Closed => CmdResult::noop("No note is open"),
        EditorSession::Editing(id) => update(state, &id, title, content),
        EditorSession::CreatingNew => {
            let note = Note::new(
                title.to_string(),
                content.to_string(),
                state.selection.folder.clone(),
            );
            debug!("Creating note {} in {:?}", note.id, note.folder_id);
            state.notes.insert(0, note.clone());
            state.selection.editor.open(note.id.clone());

            let mut result = CmdResult::default();
            result.changes.notes = true;
            result.add_message(CmdMessage::success(format!(
                "Note created: {}",
                crate::view::display_title(&note)
            )));
            result.with_affected_notes(vec![note])
        }
    }
}

fn update(state: &mut NotebookState, id: &NoteId, title: &str, content: &str) -> CmdResult {
    let Some(note) = state.note_mut(id) else {
        return CmdResult::noop(format!("Note not found: {}", id));
    };

    note.title = title.to_string();
    note.content = content.to_string();
    note.touch();
    let note = note.clone();
    debug!("Updated note {}", id);

    let mut result = CmdResult::default();
    result.changes.notes = true;
    result.add_message(CmdMessage::success(format!(
        "Note saved: {}",
        crate::view::display_title(&note)
    )));
    result.with_affected_notes(vec![note])
}

/// Removes a note. Closes the editor if that note was open.
pub fn delete(state: &mut NotebookState, id: &NoteId) -> CmdResult {
    let Some(pos) = state.notes.iter().position(|n| &n.id == id) else {
        return CmdResult::noop(format!("Note not found: {}", id));
    };
    let note = state.notes.remove(pos);
    state.selection.editor.close_if_editing(id);
    debug!("Deleted note {}", id);

    let mut result = CmdResult::default();
    result.changes.notes = true;
    result.add_message(CmdMessage::success(format!(
        "Note deleted: {}",
        crate::view::display_title(&note)
    )));
    result.with_affected_notes(vec![note])
}

/// Moves a note into `folder`, or to unfiled when `None`.
///
/// The target folder must exist; a dangling folder id is refused.
pub fn move_to(state: &mut NotebookState, id: &NoteId, folder: Option<&FolderId>) -> CmdResult {
    if let Some(folder_id) = folder {
        if state.folder(folder_id).is_none() {
            debug!("Refusing to move note {} into missing folder {}", id, folder_id);
            return CmdResult::noop(format!("Folder not found: {}", folder_id));
        }
    }

    let destination = folder
        .and_then(|f| state.folder(f))
        .map(|f| f.name.clone())
        .unwrap_or_else(|| "All Notes".to_string());

    let Some(note) = state.note_mut(id) else {
        return CmdResult::noop(format!("Note not found: {}", id));
    };
    if note.folder_id.as_ref() == folder {
        return CmdResult::noop(format!("Note is already in {}", destination));
    }

    note.folder_id = folder.cloned();
    note.touch();
    let note = note.clone();
    debug!("Moved note {} to {:?}", id, note.folder_id);

    let mut result = CmdResult::default();
    result.changes.notes = true;
    result.add_message(CmdMessage::success(format!(
        "Note moved to {}: {}",
        destination,
        crate::view::display_title(&note)
    )));
    result.with_affected_notes(vec![note])
}
