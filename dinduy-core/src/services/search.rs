//! Search filter and dashboard view
//!
//! Matching is a case-insensitive substring test over the note title and
//! the raw content markup. Because the markup is not rendered first, a
//! query such as `"<b>"` or `"ul"` can match formatting tags.

use crate::state::{Folder, Note, NoteBook};
use crate::storage::KeyValueStore;

/// Whether `query` switches the dashboard into search mode
pub fn is_active(query: &str) -> bool {
    !query.is_empty()
}

/// Whether `note` matches `query` (already lowercased)
fn note_matches(note: &Note, query_lower: &str) -> bool {
    note.title.to_lowercase().contains(query_lower)
        || note.content.to_lowercase().contains(query_lower)
}

/// Notes whose title or content contains `query`, across all folders.
///
/// An empty query matches nothing; use [`dashboard_view`] to get the
/// grouped view instead.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    if !is_active(query) {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();

    notes
        .iter()
        .filter(|note| note_matches(note, &query_lower))
        .collect()
}

/// A folder card together with the notes filed under it
#[derive(Debug, Clone, PartialEq)]
pub struct FolderGroup<'a> {
    pub folder: &'a Folder,
    pub notes: Vec<&'a Note>,
}

impl FolderGroup<'_> {
    /// Count shown on the folder card
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }
}

/// What the dashboard grid shows
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView<'a> {
    /// Folders in order, then notes without a folder
    Grouped {
        folders: Vec<FolderGroup<'a>>,
        root_notes: Vec<&'a Note>,
    },
    /// Flat list of matches, ignoring folders
    Search { results: Vec<&'a Note> },
}

impl DashboardView<'_> {
    pub fn is_search(&self) -> bool {
        matches!(self, DashboardView::Search { .. })
    }
}

/// Derive the dashboard view for the current query
pub fn dashboard_view<'a, S: KeyValueStore>(
    notebook: &'a NoteBook<S>,
    query: &str,
) -> DashboardView<'a> {
    if is_active(query) {
        let results = filter_notes(notebook.notes(), query);
        tracing::debug!("Search {:?} matched {} notes", query, results.len());
        return DashboardView::Search { results };
    }

    let folders = notebook
        .folders()
        .iter()
        .map(|folder| FolderGroup {
            folder,
            notes: notebook.notes_in_folder(&folder.id).collect(),
        })
        .collect();

    DashboardView::Grouped {
        folders,
        root_notes: notebook.root_notes().collect(),
    }
}
