use crate::commands::CmdResult;
use crate::model::NoteId;
use crate::state::NotebookState;

/// Opens the editor on a blank note. Clears any open note.
pub fn start_new(state: &mut NotebookState) -> CmdResult {
    state.selection.editor.start_new();
    CmdResult::default()
}

pub fn select_note(state: &mut NotebookState, id: &NoteId) -> CmdResult {
    if state.note(id).is_none() {
        return CmdResult::noop(format!("Note not found: {}", id));
    }
    state.selection.editor.open(id.clone());
    CmdResult::default()
}

/// Discards the edit in progress. A new note closes the editor, an existing
/// note stays open.
pub fn cancel(state: &mut NotebookState) -> CmdResult {
    state.selection.editor.cancel();
    CmdResult::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::notes;
    use crate::session::EditorSession;

    #[test]
    fn new_then_cancel_leaves_nothing_selected() {
        let mut state = NotebookState::new();
        start_new(&mut state);
        assert!(state.selection().is_creating_new());

        cancel(&mut state);
        assert_eq!(state.selection().editor, EditorSession::Closed);
        assert!(state.selected_note().is_none());
    }

    #[test]
    fn cancel_while_editing_keeps_note_selected() {
        let mut state = NotebookState::new();
        start_new(&mut state);
        let id = notes::save(&mut state, "Keep", "").affected_notes[0].id.clone();

        cancel(&mut state);
        assert_eq!(state.selection().selected_note_id(), Some(&id));
    }

    #[test]
    fn select_switches_between_notes() {
        let mut state = NotebookState::new();
        start_new(&mut state);
        let a = notes::save(&mut state, "A", "").affected_notes[0].id.clone();
        start_new(&mut state);
        let b = notes::save(&mut state, "B", "").affected_notes[0].id.clone();

        select_note(&mut state, &a);
        assert_eq!(state.selection().editor, EditorSession::Editing(a));
        select_note(&mut state, &b);
        assert_eq!(state.selection().editor, EditorSession::Editing(b));
    }

    #[test]
    fn select_from_creating_new_exits_new_mode() {
        let mut state = NotebookState::new();
        start_new(&mut state);
        let a = notes::save(&mut state, "A", "").affected_notes[0].id.clone();
        start_new(&mut state);

        select_note(&mut state, &a);
        assert!(!state.selection().is_creating_new());
    }

    #[test]
    fn select_unknown_note_is_noop() {
        let mut state = NotebookState::new();
        select_note(&mut state, &NoteId::from("ghost"));
        assert_eq!(state.selection().editor, EditorSession::Closed);
    }
}
