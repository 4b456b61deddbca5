//! Application state owner
//!
//! [`NoteBook`] holds the note and folder collections and is the only code
//! allowed to mutate them. Every mutation rewrites the affected collection
//! through the key-value store before returning.
//!
//! Operations on ids that no longer exist are no-ops: they log at debug
//! level and report `false` rather than failing.

use super::models::{timestamp_now, Folder, FolderPatch, Note, NotePatch};
use crate::config::{FOLDERS_KEY, NOTES_KEY};
use crate::error::Result;
use crate::storage::{self, KeyValueStore};
use std::collections::HashSet;

/// Note and folder collections backed by a key-value store
#[derive(Debug)]
pub struct NoteBook<S> {
    store: S,
    notes: Vec<Note>,
    folders: Vec<Folder>,
}

impl<S: KeyValueStore> NoteBook<S> {
    /// Hydrate both collections from `store`.
    ///
    /// Missing or corrupt notes start empty; missing or corrupt folders
    /// start with the seeded "Personal" and "Work" folders.
    pub fn open(store: S) -> Self {
        let notes: Vec<Note> = storage::load(&store, NOTES_KEY, Vec::new());
        let folders: Vec<Folder> = storage::load(&store, FOLDERS_KEY, Folder::seeded());

        tracing::info!(
            "Loaded {} notes and {} folders",
            notes.len(),
            folders.len()
        );

        Self {
            store,
            notes,
            folders,
        }
    }

    // --- Read access ---

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Notes filed under `folder_id`, in collection order
    pub fn notes_in_folder<'a>(&'a self, folder_id: &'a str) -> impl Iterator<Item = &'a Note> {
        self.notes
            .iter()
            .filter(move |n| n.folder_id.as_deref() == Some(folder_id))
    }

    /// Notes not filed under any folder
    pub fn root_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|n| n.folder_id.is_none())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store, for settings that live
    /// beside the collections. Writing the collection keys directly
    /// desynchronizes the in-memory state.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // --- Notes ---

    /// Create an empty note at the front of the collection
    pub fn create_note(&mut self, folder_id: Option<String>) -> Result<Note> {
        let folder_id = self.existing_folder(folder_id);
        let note = Note::new(folder_id);

        tracing::info!("Creating note: {}", note.id);

        self.notes.insert(0, note.clone());
        self.persist_notes()?;

        Ok(note)
    }

    /// Merge `patch` into the note with `id` and stamp its `updated_at`
    pub fn update_note(&mut self, id: &str, mut patch: NotePatch) -> Result<bool> {
        if let Some(folder_id) = patch.folder_id.take() {
            patch.folder_id = Some(self.existing_folder(folder_id));
        }

        let now = timestamp_now();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            tracing::debug!("Ignoring update for missing note: {}", id);
            return Ok(false);
        };

        note.apply(patch, now);
        tracing::debug!("Updated note: {}", id);

        self.persist_notes()?;
        Ok(true)
    }

    pub fn delete_note(&mut self, id: &str) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);

        if self.notes.len() == before {
            tracing::debug!("Ignoring delete for missing note: {}", id);
            return Ok(false);
        }

        tracing::info!("Deleted note: {}", id);
        self.persist_notes()?;
        Ok(true)
    }

    /// Reassign every note in `ids` to `destination` (`None` is the
    /// dashboard root). Ids that are not notes are skipped.
    pub fn move_notes(&mut self, ids: &HashSet<String>, destination: Option<&str>) -> Result<usize> {
        let destination = self.existing_folder(destination.map(str::to_string));
        let now = timestamp_now();
        let mut moved = 0;

        for note in self.notes.iter_mut().filter(|n| ids.contains(&n.id)) {
            note.apply(NotePatch::folder(destination.clone()), now);
            moved += 1;
        }

        tracing::info!("Moved {} notes to {:?}", moved, destination);

        self.persist_notes()?;
        Ok(moved)
    }

    // --- Folders ---

    /// Create a folder at the end of the collection
    pub fn create_folder(&mut self) -> Result<Folder> {
        let folder = Folder::new();

        tracing::info!("Creating folder: {}", folder.id);

        self.folders.push(folder.clone());
        self.persist_folders()?;

        Ok(folder)
    }

    pub fn update_folder(&mut self, id: &str, patch: FolderPatch) -> Result<bool> {
        let Some(folder) = self.folders.iter_mut().find(|f| f.id == id) else {
            tracing::debug!("Ignoring update for missing folder: {}", id);
            return Ok(false);
        };

        folder.apply(patch);
        tracing::debug!("Updated folder: {}", id);

        self.persist_folders()?;
        Ok(true)
    }

    /// Remove a folder. Its notes stay, moved to the dashboard root.
    pub fn delete_folder(&mut self, id: &str) -> Result<bool> {
        let before = self.folders.len();
        self.folders.retain(|f| f.id != id);

        if self.folders.len() == before {
            tracing::debug!("Ignoring delete for missing folder: {}", id);
            return Ok(false);
        }

        let removed = HashSet::from([id.to_string()]);
        let orphaned = self.orphan_notes_of(&removed);

        tracing::info!("Deleted folder: {} ({} notes orphaned)", id, orphaned);

        self.persist_notes()?;
        self.persist_folders()?;
        Ok(true)
    }

    // --- Bulk ---

    /// Remove every id in `ids` from whichever collection holds it.
    ///
    /// Returns `(notes_removed, folders_removed)`. Notes of removed
    /// folders that were not themselves selected are orphaned.
    pub fn delete_many(&mut self, ids: &HashSet<String>) -> Result<(usize, usize)> {
        let notes_before = self.notes.len();
        let folders_before = self.folders.len();

        self.notes.retain(|n| !ids.contains(&n.id));
        self.folders.retain(|f| !ids.contains(&f.id));

        let notes_removed = notes_before - self.notes.len();
        let folders_removed = folders_before - self.folders.len();
        self.orphan_notes_of(ids);

        tracing::info!(
            "Deleted {} notes and {} folders",
            notes_removed,
            folders_removed
        );

        self.persist_notes()?;
        self.persist_folders()?;
        Ok((notes_removed, folders_removed))
    }

    /// Replace both collections wholesale (backup restore)
    pub fn replace_all(&mut self, notes: Vec<Note>, folders: Vec<Folder>) -> Result<()> {
        tracing::info!(
            "Replacing state with {} notes and {} folders",
            notes.len(),
            folders.len()
        );

        self.notes = notes;
        self.folders = folders;

        self.persist_notes()?;
        self.persist_folders()?;
        Ok(())
    }

    // --- Internals ---

    /// Keep `folder_id` only if it names an existing folder
    fn existing_folder(&self, folder_id: Option<String>) -> Option<String> {
        match folder_id {
            Some(id) if self.folder(&id).is_none() => {
                tracing::warn!("Unknown folder {}, filing note at the root", id);
                None
            }
            other => other,
        }
    }

    /// Null out `folder_id` on notes referencing any of `folder_ids`
    fn orphan_notes_of(&mut self, folder_ids: &HashSet<String>) -> usize {
        let now = timestamp_now();
        let mut orphaned = 0;

        for note in self.notes.iter_mut() {
            let orphan = note
                .folder_id
                .as_ref()
                .is_some_and(|id| folder_ids.contains(id));
            if orphan {
                note.apply(NotePatch::folder(None), now);
                orphaned += 1;
            }
        }

        orphaned
    }

    fn persist_notes(&mut self) -> Result<()> {
        storage::save(&mut self.store, NOTES_KEY, &self.notes)
    }

    fn persist_folders(&mut self) -> Result<()> {
        storage::save(&mut self.store, FOLDERS_KEY, &self.folders)
    }
}
