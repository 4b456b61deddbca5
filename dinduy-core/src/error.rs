//! Error types for the Dinduy core
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized to the host UI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Import file could not be read as a backup. Shown to the user.
    #[error("Invalid backup file: {0}")]
    InvalidBackup(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
