//! Dashboard session
//!
//! Transient UI state around the persisted collections: the open editor,
//! the expanded folder, the search query, peeked cards and selection mode.
//! Nothing here is persisted.

use super::selection::{SelectionController, SelectionEffect, SelectionEvent};
use crate::error::Result;
use crate::services::editor::Editor;
use crate::services::search::{self, DashboardView};
use crate::state::{Folder, Note, NoteBook};
use crate::storage::KeyValueStore;
use std::collections::HashSet;

/// A card on the dashboard grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardRef {
    Note(String),
    Folder(String),
}

impl CardRef {
    pub fn id(&self) -> &str {
        match self {
            CardRef::Note(id) | CardRef::Folder(id) => id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    editor: Option<Editor>,
    expanded_folder: Option<String>,
    search_query: String,
    peeked: HashSet<String>,
    selection: SelectionController,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Accessors ---

    /// Editor for the open note, if any
    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn active_note_id(&self) -> Option<&str> {
        self.editor.as_ref().map(Editor::note_id)
    }

    pub fn expanded_folder(&self) -> Option<&str> {
        self.expanded_folder.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_peeked(&self, note_id: &str) -> bool {
        self.peeked.contains(note_id)
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// What the dashboard grid shows right now
    pub fn view<'a, S: KeyValueStore>(&self, notebook: &'a NoteBook<S>) -> DashboardView<'a> {
        search::dashboard_view(notebook, &self.search_query)
    }

    // --- Search ---

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    // --- Editor ---

    /// Open `note_id` in the editor. Unknown ids leave the dashboard as is.
    pub fn open_note<S: KeyValueStore>(&mut self, note_id: &str, notebook: &NoteBook<S>) -> bool {
        if notebook.note(note_id).is_none() {
            tracing::debug!("Cannot open missing note: {}", note_id);
            return false;
        }

        self.editor = Some(Editor::new(note_id));
        true
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Delete the note open in the editor and return to the dashboard
    pub fn delete_active_note<S: KeyValueStore>(&mut self, notebook: &mut NoteBook<S>) -> Result<bool> {
        let Some(editor) = self.editor.take() else {
            return Ok(false);
        };

        self.peeked.remove(editor.note_id());
        editor.delete(notebook)
    }

    // --- Creation ---

    /// Create a note, open it and leave search mode
    pub fn create_note<S: KeyValueStore>(
        &mut self,
        folder_id: Option<String>,
        notebook: &mut NoteBook<S>,
    ) -> Result<Note> {
        let note = notebook.create_note(folder_id)?;
        self.editor = Some(Editor::new(note.id.clone()));
        self.clear_search();
        Ok(note)
    }

    /// Create a folder and leave search mode
    pub fn create_folder<S: KeyValueStore>(&mut self, notebook: &mut NoteBook<S>) -> Result<Folder> {
        let folder = notebook.create_folder()?;
        self.clear_search();
        Ok(folder)
    }

    // --- Card events ---

    /// Tap on a card: toggles it while selecting, otherwise opens the note
    /// or expands/collapses the folder.
    pub fn tap_card<S: KeyValueStore>(
        &mut self,
        card: &CardRef,
        notebook: &mut NoteBook<S>,
    ) -> Result<SelectionEffect> {
        let effect = self
            .selection
            .handle(SelectionEvent::Tap(card.id().to_string()), notebook)?;

        if effect == SelectionEffect::PassThrough {
            match card {
                CardRef::Note(id) => {
                    self.open_note(id, notebook);
                }
                CardRef::Folder(id) => {
                    if self.expanded_folder.as_deref() == Some(id.as_str()) {
                        self.expanded_folder = None;
                    } else {
                        self.expanded_folder = Some(id.clone());
                    }
                }
            }
        }

        Ok(effect)
    }

    /// Long-press on a card. A note restarts the selection with just
    /// itself; a folder only enters selection mode from browsing.
    pub fn long_press_card<S: KeyValueStore>(
        &mut self,
        card: &CardRef,
        notebook: &mut NoteBook<S>,
    ) -> Result<SelectionEffect> {
        let event = match card {
            CardRef::Note(id) => SelectionEvent::NoteLongPress(id.clone()),
            CardRef::Folder(id) => SelectionEvent::LongPress(id.clone()),
        };
        self.selection.handle(event, notebook)
    }

    /// Tap on empty dashboard space
    pub fn background_tap<S: KeyValueStore>(&mut self, notebook: &mut NoteBook<S>) -> Result<SelectionEffect> {
        self.expanded_folder = None;
        self.selection.handle(SelectionEvent::BackgroundTap, notebook)
    }

    /// Selection toolbar and move dialog actions
    pub fn selection_event<S: KeyValueStore>(
        &mut self,
        event: SelectionEvent,
        notebook: &mut NoteBook<S>,
    ) -> Result<SelectionEffect> {
        let result = self.selection.handle(event, notebook);
        self.forget_missing(notebook);
        result
    }

    /// Enlarge or shrink a note card in place. Returns whether the card is
    /// now peeked. Not available in selection mode.
    pub fn toggle_peek(&mut self, note_id: &str) -> bool {
        if self.selection.is_active() {
            return self.is_peeked(note_id);
        }

        if !self.peeked.remove(note_id) {
            self.peeked.insert(note_id.to_string());
        }
        self.is_peeked(note_id)
    }

    /// Whether the card accepts a swipe-to-delete drag
    pub fn drag_enabled(&self, card: &CardRef) -> bool {
        if self.selection.is_active() {
            return false;
        }

        match card {
            CardRef::Note(id) => !self.is_peeked(id),
            CardRef::Folder(id) => self.expanded_folder.as_deref() != Some(id.as_str()),
        }
    }

    /// Delete a card released past the swipe threshold. Ignored when the
    /// card does not accept drags.
    pub fn swipe_delete<S: KeyValueStore>(
        &mut self,
        card: &CardRef,
        notebook: &mut NoteBook<S>,
    ) -> Result<bool> {
        if !self.drag_enabled(card) {
            tracing::debug!("Ignoring swipe delete on {:?}", card);
            return Ok(false);
        }

        match card {
            CardRef::Note(id) => self.delete_note(id, notebook),
            CardRef::Folder(id) => self.delete_folder(id, notebook),
        }
    }

    // --- Deletion ---

    pub fn delete_note<S: KeyValueStore>(&mut self, note_id: &str, notebook: &mut NoteBook<S>) -> Result<bool> {
        let deleted = notebook.delete_note(note_id)?;

        if self.active_note_id() == Some(note_id) {
            self.editor = None;
        }
        self.peeked.remove(note_id);

        Ok(deleted)
    }

    /// Delete a folder; its notes move to the dashboard root
    pub fn delete_folder<S: KeyValueStore>(
        &mut self,
        folder_id: &str,
        notebook: &mut NoteBook<S>,
    ) -> Result<bool> {
        let deleted = notebook.delete_folder(folder_id)?;

        if self.expanded_folder.as_deref() == Some(folder_id) {
            self.expanded_folder = None;
        }

        Ok(deleted)
    }

    /// Drop references to notes and folders that no longer exist, e.g.
    /// after a bulk delete or a backup restore.
    pub fn forget_missing<S: KeyValueStore>(&mut self, notebook: &NoteBook<S>) {
        if let Some(id) = self.active_note_id() {
            if notebook.note(id).is_none() {
                tracing::debug!("Closing editor for removed note: {}", id);
                self.editor = None;
            }
        }

        if let Some(id) = self.expanded_folder.as_deref() {
            if notebook.folder(id).is_none() {
                self.expanded_folder = None;
            }
        }

        self.peeked.retain(|id| notebook.note(id).is_some());
    }
}
