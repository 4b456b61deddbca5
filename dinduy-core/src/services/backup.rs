//! Backup service
//!
//! Exports the whole state as one pretty-printed JSON document and restores
//! it wholesale. The document has exactly two top-level keys, `notes` and
//! `folders`, and no version field.
//!
//! Import failure modes are deliberately asymmetric:
//! - text that is not valid JSON is an error the user sees;
//! - valid JSON without both keys is ignored silently, with a warning in
//!   the log so the case stays visible during testing.

use crate::config::APP_NAME;
use crate::error::{AppError, Result};
use crate::state::{Folder, Note, NoteBook};
use crate::storage::KeyValueStore;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Message shown after a successful import
pub const IMPORT_SUCCESS_MESSAGE: &str = "Data imported successfully!";

/// Owned whole-state snapshot, as read from a backup file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    notes: &'a [Note],
    folders: &'a [Folder],
}

/// Result of an import that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// State was replaced
    Imported { notes: usize, folders: usize },
    /// Document lacked required keys; state untouched
    Ignored { missing: Vec<&'static str> },
}

impl ImportOutcome {
    /// Confirmation for the user, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ImportOutcome::Imported { .. } => Some(IMPORT_SUCCESS_MESSAGE),
            ImportOutcome::Ignored { .. } => None,
        }
    }
}

/// Serialize the current state with 2-space indentation
pub fn export_json<S: KeyValueStore>(notebook: &NoteBook<S>) -> Result<String> {
    let snapshot = SnapshotRef {
        notes: notebook.notes(),
        folders: notebook.folders(),
    };

    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Backup file name for a calendar date, e.g. `dinduy-backup-2024-03-09.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{}-backup-{}.json", APP_NAME, date.format("%Y-%m-%d"))
}

/// Write an export named with today's UTC date into `dir`
pub async fn write_export<S: KeyValueStore>(notebook: &NoteBook<S>, dir: &Path) -> Result<PathBuf> {
    let json = export_json(notebook)?;
    let path = dir.join(backup_file_name(Utc::now().date_naive()));

    fs::create_dir_all(dir).await?;
    fs::write(&path, json.as_bytes()).await?;

    tracing::info!(
        "Exported {} notes and {} folders to {:?}",
        notebook.notes().len(),
        notebook.folders().len(),
        path
    );

    Ok(path)
}

/// Parsed backup text
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Complete(Snapshot),
    /// Valid JSON lacking these top-level keys
    MissingKeys(Vec<&'static str>),
}

/// Whether a top-level value counts as absent: `null`, `false`, `0` or `""`.
/// Empty arrays and objects are present.
fn is_falsy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
    }
}

/// Parse backup text. A key holding a falsy value counts as missing.
pub fn decode(text: &str) -> Result<Decoded> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| AppError::InvalidBackup(e.to_string()))?;

    let missing: Vec<&'static str> = ["notes", "folders"]
        .into_iter()
        .filter(|key| value.get(*key).map_or(true, is_falsy))
        .collect();

    if !missing.is_empty() {
        return Ok(Decoded::MissingKeys(missing));
    }

    let snapshot: Snapshot =
        serde_json::from_value(value).map_err(|e| AppError::InvalidBackup(e.to_string()))?;

    Ok(Decoded::Complete(snapshot))
}

/// Restore state from backup text
pub fn import_json<S: KeyValueStore>(notebook: &mut NoteBook<S>, text: &str) -> Result<ImportOutcome> {
    let snapshot = match decode(text) {
        Ok(Decoded::Complete(snapshot)) => snapshot,
        Ok(Decoded::MissingKeys(missing)) => {
            tracing::warn!(
                missing = ?missing,
                bytes = text.len(),
                "Backup document lacks required keys, import ignored"
            );
            return Ok(ImportOutcome::Ignored { missing });
        }
        Err(e) => {
            tracing::warn!("Rejected backup: {}", e);
            return Err(e);
        }
    };

    let outcome = ImportOutcome::Imported {
        notes: snapshot.notes.len(),
        folders: snapshot.folders.len(),
    };

    notebook.replace_all(snapshot.notes, snapshot.folders)?;

    tracing::info!("Backup imported: {:?}", outcome);
    Ok(outcome)
}

/// Read `path` and restore state from it
pub async fn import_file<S: KeyValueStore>(
    notebook: &mut NoteBook<S>,
    path: &Path,
) -> Result<ImportOutcome> {
    tracing::info!("Importing backup from {:?}", path);

    let text = fs::read_to_string(path).await?;
    import_json(notebook, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NotePatch;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    fn create_test_notebook() -> NoteBook<MemoryStore> {
        let mut book = NoteBook::open(MemoryStore::new());
        let note = book.create_note(Some("2".to_string())).unwrap();
        book.update_note(&note.id, NotePatch::title("Standup")).unwrap();
        book.create_note(None).unwrap();
        book
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let book = create_test_notebook();

        let json = export_json(&book).unwrap();

        assert!(json.starts_with("{\n  \"notes\": [\n    {"));
        assert!(json.contains("\n  \"folders\": ["));
    }

    #[test]
    fn test_export_does_not_mutate() {
        let book = create_test_notebook();
        let writes = book.store().write_count();

        export_json(&book).unwrap();

        assert_eq!(book.store().write_count(), writes);
    }

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        assert_eq!(backup_file_name(date), "dinduy-backup-2024-03-09.json");
    }

    #[test]
    fn test_round_trip() {
        let book = create_test_notebook();
        let json = export_json(&book).unwrap();

        let mut restored = NoteBook::open(MemoryStore::new());
        let outcome = import_json(&mut restored, &json).unwrap();

        assert_eq!(outcome, ImportOutcome::Imported { notes: 2, folders: 2 });
        assert_eq!(restored.notes(), book.notes());
        assert_eq!(restored.folders(), book.folders());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let mut book = create_test_notebook();
        let before = book.notes().to_vec();

        let result = import_json(&mut book, "{ notes: [");

        assert!(matches!(result, Err(AppError::InvalidBackup(_))));
        assert_eq!(book.notes(), before.as_slice());
    }

    #[test]
    fn test_missing_folders_key_is_ignored() {
        let mut book = create_test_notebook();
        let before = book.notes().to_vec();
        let writes = book.store().write_count();

        let outcome = import_json(&mut book, r#"{"notes": []}"#).unwrap();

        assert_eq!(outcome, ImportOutcome::Ignored { missing: vec!["folders"] });
        assert_eq!(outcome.message(), None);
        assert_eq!(book.notes(), before.as_slice());
        assert_eq!(book.store().write_count(), writes);
    }

    #[test]
    fn test_null_key_counts_as_missing() {
        let mut book = create_test_notebook();

        let outcome = import_json(&mut book, r#"{"notes": null, "folders": []}"#).unwrap();

        assert_eq!(outcome, ImportOutcome::Ignored { missing: vec!["notes"] });
    }

    #[test]
    fn test_falsy_keys_count_as_missing() {
        let mut book = create_test_notebook();
        let before = book.notes().to_vec();

        for json in [
            r#"{"notes": false, "folders": []}"#,
            r#"{"notes": 0, "folders": []}"#,
            r#"{"notes": "", "folders": []}"#,
        ] {
            let outcome = import_json(&mut book, json).unwrap();
            assert_eq!(outcome, ImportOutcome::Ignored { missing: vec!["notes"] });
        }

        assert_eq!(book.notes(), before.as_slice());
    }

    #[test]
    fn test_empty_collections_are_present() {
        let mut book = create_test_notebook();

        let outcome = import_json(&mut book, r#"{"notes": [], "folders": []}"#).unwrap();

        assert_eq!(outcome, ImportOutcome::Imported { notes: 0, folders: 0 });
        assert!(book.notes().is_empty());
    }

    #[test]
    fn test_non_object_document_is_ignored() {
        let mut book = create_test_notebook();

        let outcome = import_json(&mut book, "[1, 2, 3]").unwrap();

        assert_eq!(
            outcome,
            ImportOutcome::Ignored {
                missing: vec!["notes", "folders"]
            }
        );
    }

    #[test]
    fn test_wrongly_typed_collections_are_error() {
        let mut book = create_test_notebook();

        let result = import_json(&mut book, r#"{"notes": "x", "folders": []}"#);

        assert!(matches!(result, Err(AppError::InvalidBackup(_))));
        assert_eq!(book.notes().len(), 2);
    }

    #[test]
    fn test_import_replaces_without_merge() {
        let mut book = create_test_notebook();
        let json = r#"{
            "notes": [{"id": "x", "title": "Only", "content": "", "folderId": "f",
                       "color": "sky", "shape": "rounded-lg", "icon": "atom", "updatedAt": 1}],
            "folders": [{"id": "f", "name": "Imported", "color": "gold", "shape": "rounded-2xl"}]
        }"#;

        let outcome = import_json(&mut book, json).unwrap();

        assert_eq!(outcome.message(), Some("Data imported successfully!"));
        assert_eq!(book.notes().len(), 1);
        assert_eq!(book.notes()[0].title, "Only");
        assert_eq!(book.folders().len(), 1);
        assert_eq!(book.folders()[0].name, "Imported");
    }

    #[tokio::test]
    async fn test_write_and_import_file() {
        let temp_dir = TempDir::new().unwrap();
        let book = create_test_notebook();

        let path = write_export(&book, temp_dir.path()).await.unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("dinduy-backup-"));

        let mut restored = NoteBook::open(MemoryStore::new());
        import_file(&mut restored, &path).await.unwrap();

        assert_eq!(restored.notes(), book.notes());
    }

    #[tokio::test]
    async fn test_import_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut book = create_test_notebook();

        let result = import_file(&mut book, &temp_dir.path().join("nope.json")).await;

        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
