//! Application configuration constants
//!
//! Central location for storage keys, gesture thresholds and the
//! defaults used when creating notes and folders.

// ===== Identity =====

/// Application name, used in backup file names
pub const APP_NAME: &str = "dinduy";

// ===== Storage Keys =====

/// Key holding the ordered note array
pub const NOTES_KEY: &str = "desnote-notes";
/// Key holding the ordered folder array
pub const FOLDERS_KEY: &str = "desnote-folders";
/// Key holding the dark-mode flag
pub const THEME_KEY: &str = "desnote-theme";

/// Extension of the per-key files written by the file store
pub const STORE_FILE_EXTENSION: &str = "json";

// ===== Gesture Settings =====

/// Press duration in milliseconds before a long-press fires
pub const LONG_PRESS_MS: u64 = 500;

/// Horizontal pointer offset a card must be released past to be deleted.
/// Only leftward swipes delete.
pub const DRAG_DELETE_THRESHOLD: f64 = -100.0;

/// Elastic factor applied to leftward drag (more compliant)
pub const DRAG_ELASTIC_LEFT: f64 = 0.5;

/// Elastic factor applied to rightward drag (stiffer)
pub const DRAG_ELASTIC_RIGHT: f64 = 0.1;

// ===== Defaults =====

/// Name given to a freshly created folder
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

/// Title shown for a note without one
pub const UNTITLED_LABEL: &str = "Untitled";

/// Preview shown for a note whose content has no visible text
pub const EMPTY_PREVIEW_LABEL: &str = "No content";

/// Move-dialog entry for the dashboard root
pub const ROOT_DESTINATION_LABEL: &str = "Dashboard";
