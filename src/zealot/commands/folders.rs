use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Folder, FolderId};
use crate::state::NotebookState;
use log::debug;

pub fn create(state: &mut NotebookState, name: &str) -> CmdResult {
    let name = name.trim();
    if name.is_empty() {
        return CmdResult::noop("Folder name cannot be empty");
    }

    let folder = Folder::new(name.to_string());
    debug!("Creating folder {} ({})", folder.id, folder.name);
    state.folders.push(folder.clone());

    let mut result = CmdResult::default().with_affected_folders(vec![folder]);
    result.changes.folders = true;
    result.add_message(CmdMessage::success(format!("Folder created: {}", name)));
    result
}

pub fn rename(state: &mut NotebookState, id: &FolderId, new_name: &str) -> CmdResult {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return CmdResult::noop("Folder name cannot be empty");
    }

    let Some(folder) = state.folder_mut(id) else {
        return CmdResult::noop(format!("Folder not found: {}", id));
    };
    if folder.name == new_name {
        return CmdResult::noop(format!("Folder is already named {}", new_name));
    }

    let old_name = std::mem::replace(&mut folder.name, new_name.to_string());
    let folder = folder.clone();
    debug!("Renamed folder {} from {} to {}", id, old_name, new_name);

    let mut result = CmdResult::default().with_affected_folders(vec![folder]);
    result.changes.folders = true;
    result.add_message(CmdMessage::success(format!(
        "Folder renamed: {} -> {}",
        old_name, new_name
    )));
    result
}

/// Removes a folder and moves its notes to unfiled in the same step.
pub fn delete(state: &mut NotebookState, id: &FolderId) -> CmdResult {
    let Some(pos) = state.folders.iter().position(|f| &f.id == id) else {
        return CmdResult::noop(format!("Folder not found: {}", id));
    };
    let folder = state.folders.remove(pos);

    let mut moved = Vec::new();
    for note in state
        .notes
        .iter_mut()
        .filter(|n| n.folder_id.as_ref() == Some(id))
    {
        note.folder_id = None;
        note.touch();
        moved.push(note.clone());
    }

    if state.selection.folder.as_ref() == Some(id) {
        state.selection.folder = None;
    }

    debug!(
        "Deleted folder {} and moved {} notes to unfiled",
        id,
        moved.len()
    );

    let mut result = CmdResult::default();
    result.changes.folders = true;
    result.changes.notes = !moved.is_empty();
    result.add_message(CmdMessage::success(match moved.len() {
        0 => format!("Folder deleted: {}", folder.name),
        n => format!(
            "Folder deleted: {} ({} notes moved to All Notes)",
            folder.name, n
        ),
    }));
    result
        .with_affected_folders(vec![folder])
        .with_affected_notes(moved)
}

/// Changes the viewed folder. `None` is "All Notes". Leaves the editor alone.
pub fn select(state: &mut NotebookState, id: Option<&FolderId>) -> CmdResult {
    match id {
        None => state.selection.folder = None,
        Some(id) => {
            if state.folder(id).is_none() {
                return CmdResult::noop(format!("Folder not found: {}", id));
            }
            state.selection.folder = Some(id.clone());
        }
    }
    CmdResult::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{editor, notes};
    use crate::model::NoteId;
    use crate::state::NoteFilter;

    fn folder_id(result: &CmdResult) -> FolderId {
        result.affected_folders[0].id.clone()
    }

    #[test]
    fn creates_folder_with_trimmed_name() {
        let mut state = NotebookState::new();
        let result = create(&mut state, "  Work  ");

        assert!(result.changes.folders);
        assert!(!result.changes.notes);
        assert_eq!(state.folders().len(), 1);
        assert_eq!(state.folders()[0].name, "Work");
    }

    #[test]
    fn blank_name_is_noop() {
        let mut state = NotebookState::new();
        let result = create(&mut state, "   ");

        assert!(!result.changes.any());
        assert!(state.folders().is_empty());
    }

    #[test]
    fn folder_ids_are_unique() {
        let mut state = NotebookState::new();
        create(&mut state, "A");
        create(&mut state, "A");
        assert_ne!(state.folders()[0].id, state.folders()[1].id);
    }

    #[test]
    fn rename_keeps_created_at() {
        let mut state = NotebookState::new();
        let id = folder_id(&create(&mut state, "Work"));
        let created = state.folders()[0].created_at;

        let result = rename(&mut state, &id, " Projects ");

        assert!(result.changes.folders);
        assert_eq!(state.folders()[0].name, "Projects");
        assert_eq!(state.folders()[0].created_at, created);
    }

    #[test]
    fn rename_noops() {
        let mut state = NotebookState::new();
        let id = folder_id(&create(&mut state, "Work"));

        assert!(!rename(&mut state, &id, "  ").changes.any());
        assert!(!rename(&mut state, &FolderId::from("missing"), "X").changes.any());
        assert!(!rename(&mut state, &id, "Work").changes.any());
        assert_eq!(state.folders()[0].name, "Work");
    }

    #[test]
    fn delete_moves_notes_to_unfiled() {
        let mut state = NotebookState::new();
        let f1 = folder_id(&create(&mut state, "F1"));

        select(&mut state, Some(&f1));
        editor::start_new(&mut state);
        notes::save(&mut state, "A", "in folder");
        select(&mut state, None);
        editor::start_new(&mut state);
        notes::save(&mut state, "B", "unfiled");

        let before = state
            .notes()
            .iter()
            .find(|n| n.title == "A")
            .map(|n| n.updated_at)
            .unwrap();

        let result = delete(&mut state, &f1);

        assert!(result.changes.folders);
        assert!(result.changes.notes);
        assert!(state.folders().is_empty());
        assert!(state.notes().iter().all(|n| n.folder_id.is_none()));
        assert_eq!(state.notes_in(&NoteFilter::Unfiled).len(), 2);
        assert_eq!(state.notes_in(&NoteFilter::All).len(), 2);

        let a = state.notes().iter().find(|n| n.title == "A").unwrap();
        assert!(a.updated_at > before);
    }

    #[test]
    fn delete_resets_selection_when_viewing_deleted_folder() {
        let mut state = NotebookState::new();
        let f1 = folder_id(&create(&mut state, "F1"));
        let f2 = folder_id(&create(&mut state, "F2"));

        select(&mut state, Some(&f1));
        delete(&mut state, &f2);
        assert_eq!(state.selection().folder.as_ref(), Some(&f1));

        delete(&mut state, &f1);
        assert!(state.selection().folder.is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let mut state = NotebookState::new();
        let f1 = folder_id(&create(&mut state, "F1"));
        delete(&mut state, &f1);

        let again = delete(&mut state, &f1);
        assert!(!again.changes.any());
    }

    #[test]
    fn delete_empty_folder_leaves_notes_untouched() {
        let mut state = NotebookState::new();
        let f1 = folder_id(&create(&mut state, "F1"));
        let result = delete(&mut state, &f1);
        assert!(!result.changes.notes);
    }

    #[test]
    fn select_does_not_touch_editor() {
        let mut state = NotebookState::new();
        let f1 = folder_id(&create(&mut state, "F1"));
        editor::start_new(&mut state);
        notes::save(&mut state, "Open", "");
        let open: NoteId = state.selection().selected_note_id().cloned().unwrap();

        select(&mut state, Some(&f1));
        assert_eq!(state.selection().selected_note_id(), Some(&open));
    }

    #[test]
    fn select_unknown_folder_is_noop() {
        let mut state = NotebookState::new();
        select(&mut state, Some(&FolderId::from("nope")));
        assert!(state.selection().folder.is_none());
    }
}
