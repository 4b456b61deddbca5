//! Services module
//!
//! Operations layered over the `NoteBook` state owner: search, backup,
//! editing and preferences.

pub mod backup;
pub mod editor;
pub mod search;
pub mod settings;

pub use backup::{ImportOutcome, Snapshot};
pub use editor::{Editor, FormatCommand, FormattingSurface, HtmlSurface};
pub use search::{dashboard_view, filter_notes, DashboardView, FolderGroup};
pub use settings::Preferences;
