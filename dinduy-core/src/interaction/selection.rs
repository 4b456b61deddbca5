//! Multi-select mode
//!
//! [`SelectionController`] is the only owner of the selected id set. Bulk
//! data changes (move, delete) are delegated to the [`NoteBook`].

use crate::config::ROOT_DESTINATION_LABEL;
use crate::error::Result;
use crate::state::NoteBook;
use crate::storage::KeyValueStore;
use std::collections::HashSet;
use std::mem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Browsing,
    Selecting(HashSet<String>),
    /// Choosing a destination for the selected notes
    MoveDialog(HashSet<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Long-press on a folder card. Only enters selection mode.
    LongPress(String),
    /// Long-press on a note card. Also restarts an ongoing selection with
    /// just this note.
    NoteLongPress(String),
    /// Tap on a note or folder card
    Tap(String),
    OpenMoveDialog,
    /// Destination chosen; `None` is the dashboard root
    MoveTo(Option<String>),
    CancelMove,
    DeleteSelected,
    /// Toolbar close button
    Close,
    BackgroundTap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEffect {
    /// The event has no meaning in the current state
    Ignored,
    /// Not a selection event while browsing; the caller handles it
    PassThrough,
    /// Selection now holds only the pressed card
    Entered,
    Toggled { selected: bool },
    DialogOpened,
    DialogCancelled,
    Moved(usize),
    Deleted { notes: usize, folders: usize },
    Cleared,
}

/// One row of the move dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDestination<'a> {
    pub folder_id: Option<&'a str>,
    pub label: &'a str,
}

/// Destinations offered by the move dialog: the dashboard root, then every
/// folder in order
pub fn move_destinations<S: KeyValueStore>(notebook: &NoteBook<S>) -> Vec<MoveDestination<'_>> {
    let root = MoveDestination {
        folder_id: None,
        label: ROOT_DESTINATION_LABEL,
    };

    std::iter::once(root)
        .chain(notebook.folders().iter().map(|f| MoveDestination {
            folder_id: Some(f.id.as_str()),
            label: f.name.as_str(),
        }))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Whether selection mode is on (including the move dialog)
    pub fn is_active(&self) -> bool {
        !matches!(self.state, SelectionState::Browsing)
    }

    pub fn is_move_dialog_open(&self) -> bool {
        matches!(self.state, SelectionState::MoveDialog(_))
    }

    pub fn selected(&self) -> Option<&HashSet<String>> {
        match &self.state {
            SelectionState::Browsing => None,
            SelectionState::Selecting(ids) | SelectionState::MoveDialog(ids) => Some(ids),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected().is_some_and(|ids| ids.contains(id))
    }

    pub fn selected_count(&self) -> usize {
        self.selected().map_or(0, HashSet::len)
    }

    /// Apply one event.
    ///
    /// Move and delete leave selection mode before touching the notebook,
    /// so a failed write still ends in [`SelectionState::Browsing`].
    pub fn handle<S: KeyValueStore>(
        &mut self,
        event: SelectionEvent,
        notebook: &mut NoteBook<S>,
    ) -> Result<SelectionEffect> {
        use SelectionEvent as E;
        use SelectionState as St;

        let state = mem::take(&mut self.state);

        match (state, event) {
            (St::Browsing, E::LongPress(id) | E::NoteLongPress(id))
            | (St::Selecting(_), E::NoteLongPress(id)) => {
                tracing::debug!("Selecting only {}", id);
                self.state = St::Selecting(HashSet::from([id]));
                Ok(SelectionEffect::Entered)
            }
            (St::Browsing, E::Tap(_)) => Ok(SelectionEffect::PassThrough),
            (St::Selecting(mut ids), E::Tap(id)) => {
                let selected = if ids.remove(&id) {
                    false
                } else {
                    ids.insert(id);
                    true
                };
                self.state = St::Selecting(ids);
                Ok(SelectionEffect::Toggled { selected })
            }
            (St::Selecting(ids), E::OpenMoveDialog) => {
                self.state = St::MoveDialog(ids);
                Ok(SelectionEffect::DialogOpened)
            }
            (St::MoveDialog(ids), E::MoveTo(destination)) => {
                let moved = notebook.move_notes(&ids, destination.as_deref())?;
                Ok(SelectionEffect::Moved(moved))
            }
            (St::MoveDialog(ids), E::CancelMove) => {
                self.state = St::Selecting(ids);
                Ok(SelectionEffect::DialogCancelled)
            }
            (St::Selecting(ids), E::DeleteSelected) => {
                let (notes, folders) = notebook.delete_many(&ids)?;
                Ok(SelectionEffect::Deleted { notes, folders })
            }
            (St::Selecting(ids), E::Close | E::BackgroundTap) => {
                tracing::debug!("Leaving selection mode, {} ids dropped", ids.len());
                Ok(SelectionEffect::Cleared)
            }
            (state, event) => {
                tracing::debug!("Ignoring {:?} in state {:?}", event, state);
                self.state = state;
                Ok(SelectionEffect::Ignored)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::storage::MemoryStore;

    fn create_test_notebook() -> NoteBook<MemoryStore> {
        NoteBook::open(MemoryStore::new())
    }

    fn press(
        ctrl: &mut SelectionController,
        book: &mut NoteBook<MemoryStore>,
        event: SelectionEvent,
    ) -> SelectionEffect {
        ctrl.handle(event, book).unwrap()
    }

    #[test]
    fn test_long_press_enters_with_single_id() {
        let mut book = create_test_notebook();
        let mut ctrl = SelectionController::new();

        let effect = press(&mut ctrl, &mut book, SelectionEvent::LongPress("a".into()));

        assert_eq!(effect, SelectionEffect::Entered);
        assert_eq!(ctrl.selected(), Some(&HashSet::from(["a".to_string()])));
    }

    #[test]
    fn test_folder_long_press_while_selecting_is_ignored() {
        let mut book = create_test_notebook();
        let mut ctrl = SelectionController::new();
        press(&mut ctrl, &mut book, SelectionEvent::NoteLongPress("a".into()));

        let effect = press(&mut ctrl, &mut book, SelectionEvent::LongPress("1".into()));

        assert_eq!(effect, SelectionEffect::Ignored);
        assert!(ctrl.is_selected("a"));
        assert!(!ctrl.is_selected("1"));
    }

    #[test]
    fn test_note_long_press_while_selecting_restarts_selection() {
        let mut book = create_test_notebook();
        let mut ctrl = SelectionController::new();
        press(&mut ctrl, &mut book, SelectionEvent::NoteLongPress("a".into()));
        press(&mut ctrl, &mut book, SelectionEvent::Tap("1".into()));

        let effect = press(&mut ctrl, &mut book, SelectionEvent::NoteLongPress("b".into()));

        assert_eq!(effect, SelectionEffect::Entered);
        assert_eq!(ctrl.selected(), Some(&HashSet::from(["b".to_string()])));
    }

    #[test]
    fn test_note_long_press_ignored_in_move_dialog() {
        let mut book = create_test_notebook();
        let mut ctrl = SelectionController::new();
        press(&mut ctrl, &mut book, SelectionEvent::NoteLongPress("a".into()));
        press(&mut ctrl, &mut book, SelectionEvent::OpenMoveDialog);

        let effect = press(&mut ctrl, &mut book, SelectionEvent::NoteLongPress("b".into()));

        assert_eq!(effect, SelectionEffect::Ignored);
        assert!(ctrl.is_move_dialog_open());
        assert!(ctrl.is_selected("a"));
    }

    #[test]
    fn test_tap_while_browsing_passes_through() {
        let mut book = create_test_notebook();
        let mut ctrl = SelectionController::new();

        let effect = press(&mut ctrl, &mut book, SelectionEvent::Tap("a".into()));

        assert_eq!(effect, SelectionEffect::PassThrough);
        assert!(!ctrl.is_active());
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut book = create_test_notebook();
        let mut ctrl = SelectionController::new();
        press(&mut ctrl, &mut book, SelectionEvent::LongPress("a".into()));
        let before = ctrl.selected().cloned();

        for id in ["b", "a"] {
            let first = press(&mut ctrl, &mut book, SelectionEvent::Tap(id.into()));
            let second = press(&mut ctrl, &mut book, SelectionEvent::Tap(id.into()));
            assert_ne!(first, second);
            assert_eq!(ctrl.selected().cloned(), before);
        }
    }

    #[test]
    fn test_emptied_selection_stays_active() {
        let mut book = create_test_notebook();
        let mut ctrl = SelectionController::new();
        press(&mut ctrl, &mut book, SelectionEvent::LongPress("a".into()));

        press(&mut ctrl, &mut book, SelectionEvent::Tap("a".into()));

        assert!(ctrl.is_active());
        assert_eq!(ctrl.selected_count(), 0);
    }

    #[test]
    fn test_move_selected_notes() {
        let mut book = create_test_notebook();
        let note = book.create_note(None).unwrap();
        let mut ctrl = SelectionController::new();

        press(&mut ctrl, &mut book, SelectionEvent::LongPress(note.id.clone()));
        press(&mut ctrl, &mut book, SelectionEvent::Tap("2".into()));
        assert_eq!(
            press(&mut ctrl, &mut book, SelectionEvent::OpenMoveDialog),
            SelectionEffect::DialogOpened
        );
        assert!(ctrl.is_move_dialog_open());

        let effect = press(&mut ctrl, &mut book, SelectionEvent::MoveTo(Some("1".into())));

        assert_eq!(effect, SelectionEffect::Moved(1));
        assert_eq!(ctrl.state(), &SelectionState::Browsing);
        assert_eq!(book.note(&note.id).unwrap().folder_id.as_deref(), Some("1"));
        assert!(book.folder("2").is_some());
    }

    #[test]
    fn test_cancel_move_keeps_selection() {
        let mut book = create_test_notebook();
        let mut ctrl = SelectionController::new();
        press(&mut ctrl, &mut book, SelectionEvent::LongPress("a".into()));
        press(&mut ctrl, &mut book, SelectionEvent::OpenMoveDialog);

        let effect = press(&mut ctrl, &mut book, SelectionEvent::CancelMove);

        assert_eq!(effect, SelectionEffect::DialogCancelled);
        assert!(ctrl.is_selected("a"));
        assert!(!ctrl.is_move_dialog_open());
    }

    #[test]
    fn test_dialog_ignores_taps_and_background() {
        let mut book = create_test_notebook();
        let mut ctrl = SelectionController::new();
        press(&mut ctrl, &mut book, SelectionEvent::LongPress("a".into()));
        press(&mut ctrl, &mut book, SelectionEvent::OpenMoveDialog);

        assert_eq!(
            press(&mut ctrl, &mut book, SelectionEvent::Tap("b".into())),
            SelectionEffect::Ignored
        );
        assert_eq!(
            press(&mut ctrl, &mut book, SelectionEvent::BackgroundTap),
            SelectionEffect::Ignored
        );
        assert!(ctrl.is_move_dialog_open());
    }

    #[test]
    fn test_delete_selected_spans_collections() {
        let mut book = create_test_notebook();
        let note = book.create_note(Some("1".into())).unwrap();
        let mut ctrl = SelectionController::new();
        press(&mut ctrl, &mut book, SelectionEvent::LongPress("2".into()));
        press(&mut ctrl, &mut book, SelectionEvent::Tap(note.id.clone()));

        let effect = press(&mut ctrl, &mut book, SelectionEvent::DeleteSelected);

        assert_eq!(effect, SelectionEffect::Deleted { notes: 1, folders: 1 });
        assert!(!ctrl.is_active());
        assert!(book.notes().is_empty());
        assert_eq!(book.folders().len(), 1);
    }

    #[test]
    fn test_close_and_background_clear_without_mutation() {
        let mut book = create_test_notebook();
        book.create_note(None).unwrap();
        let mut ctrl = SelectionController::new();

        for exit in [SelectionEvent::Close, SelectionEvent::BackgroundTap] {
            press(&mut ctrl, &mut book, SelectionEvent::LongPress("1".into()));
            let writes = book.store().write_count();

            assert_eq!(press(&mut ctrl, &mut book, exit), SelectionEffect::Cleared);
            assert!(!ctrl.is_active());
            assert_eq!(book.store().write_count(), writes);
        }
    }

    #[test]
    fn test_failed_write_still_leaves_selection_mode() {
        struct FailingStore;

        impl KeyValueStore for FailingStore {
            fn read(&self, _key: &str) -> Result<Option<String>> {
                Ok(None)
            }

            fn write(&mut self, key: &str, _value: &str) -> Result<()> {
                Err(AppError::Storage(format!("quota exceeded for {}", key)))
            }
        }

        let mut book = NoteBook::open(FailingStore);
        let mut ctrl = SelectionController::new();
        ctrl.handle(SelectionEvent::LongPress("1".into()), &mut book)
            .unwrap();

        let result = ctrl.handle(SelectionEvent::DeleteSelected, &mut book);

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(ctrl.state(), &SelectionState::Browsing);
    }

    #[test]
    fn test_move_destinations() {
        let book = create_test_notebook();

        let destinations = move_destinations(&book);

        let labels: Vec<&str> = destinations.iter().map(|d| d.label).collect();
        assert_eq!(labels, vec!["Dashboard", "Personal", "Work"]);
        assert_eq!(destinations[0].folder_id, None);
        assert_eq!(destinations[2].folder_id, Some("2"));
    }
}
