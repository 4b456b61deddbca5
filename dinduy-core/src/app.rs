//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! The persisted collections, preferences and dashboard session are
//! created here and made available through AppState.

use crate::error::Result;
use crate::interaction::DashboardSession;
use crate::services::backup::{self, ImportOutcome};
use crate::services::settings::Preferences;
use crate::state::NoteBook;
use crate::storage::FileStore;
use std::path::{Path, PathBuf};

/// Directory under the app data dir holding the key-value files
pub const STORE_DIR: &str = "store";
/// Directory under the app data dir receiving exports
pub const BACKUPS_DIR: &str = "backups";

/// Central application state
#[derive(Debug)]
pub struct AppState {
    pub app_data_dir: PathBuf,
    pub notebook: NoteBook<FileStore>,
    pub preferences: Preferences,
    pub session: DashboardSession,
}

impl AppState {
    pub fn backups_dir(&self) -> PathBuf {
        self.app_data_dir.join(BACKUPS_DIR)
    }

    /// Flip dark mode and persist it. Returns the new value.
    pub fn toggle_theme(&mut self) -> Result<bool> {
        self.preferences
            .toggle_dark_mode(self.notebook.store_mut())
    }

    /// Write a dated export into the backups directory
    pub async fn export_backup(&self) -> Result<PathBuf> {
        backup::write_export(&self.notebook, &self.backups_dir()).await
    }

    /// Restore state from a backup file and drop session references to
    /// items that did not survive the restore
    pub async fn import_backup(&mut self, path: &Path) -> Result<ImportOutcome> {
        let outcome = backup::import_file(&mut self.notebook, path).await?;

        if let ImportOutcome::Imported { .. } = outcome {
            self.session.forget_missing(&self.notebook);
        }

        Ok(outcome)
    }
}

/// Application setup - called once on startup
pub fn setup(app_data_dir: PathBuf) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("App data directory: {:?}", app_data_dir);

    // Create necessary directories
    std::fs::create_dir_all(&app_data_dir)?;
    std::fs::create_dir_all(app_data_dir.join(BACKUPS_DIR))?;

    let store = FileStore::new(app_data_dir.join(STORE_DIR));
    store.initialize()?;

    // Hydrate persisted state
    let preferences = Preferences::load(&store);
    let notebook = NoteBook::open(store);

    tracing::info!("Application initialized successfully");

    Ok(AppState {
        app_data_dir,
        notebook,
        preferences,
        session: DashboardSession::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_setup_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");

        let state = setup(data_dir.clone()).unwrap();

        assert!(data_dir.join(STORE_DIR).is_dir());
        assert!(data_dir.join(BACKUPS_DIR).is_dir());
        assert_eq!(state.notebook.folders().len(), 2);
        assert!(!state.preferences.dark_mode);
    }

    #[test]
    fn test_theme_survives_restart() {
        let temp_dir = TempDir::new().unwrap();

        let mut state = setup(temp_dir.path().to_path_buf()).unwrap();
        assert!(state.toggle_theme().unwrap());
        drop(state);

        let state = setup(temp_dir.path().to_path_buf()).unwrap();
        assert!(state.preferences.dark_mode);
    }

    #[tokio::test]
    async fn test_import_closes_editor_for_replaced_note() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = setup(temp_dir.path().to_path_buf()).unwrap();

        let path = state.export_backup().await.unwrap();
        state
            .session
            .create_note(None, &mut state.notebook)
            .unwrap();
        assert!(state.session.active_note_id().is_some());

        let outcome = state.import_backup(&path).await.unwrap();

        assert_eq!(outcome, ImportOutcome::Imported { notes: 0, folders: 2 });
        assert!(state.session.active_note_id().is_none());
        assert!(state.notebook.notes().is_empty());
    }
}
