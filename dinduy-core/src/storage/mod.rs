//! Storage module
//!
//! Durable key-value persistence for the whole application state.
//! Each key holds one JSON document that is rewritten in full on every
//! change; there is no diffing and no debouncing.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Raw key-value backend.
///
/// Implementations deal only in strings; (de)serialization lives in
/// [`load`] and [`save`].
pub trait KeyValueStore {
    /// Read the raw value under `key`. `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`. Must not leave a partial value behind.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Load and decode the value under `key`.
///
/// Absent, unreadable or malformed values all yield `default`. Failures are
/// logged and never surfaced.
pub fn load<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No stored value for {}, using default", key);
            return default;
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}, using default", key, e);
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Corrupt value under {}: {}, using default", key, e);
            default
        }
    }
}

/// Encode `value` and persist it under `key`.
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;

    if let Err(e) = store.write(key, &raw) {
        tracing::error!("Failed to persist {}: {}", key, e);
        return Err(e);
    }

    tracing::debug!("Persisted {} ({} bytes)", key, raw.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_absent_returns_default() {
        let store = MemoryStore::new();

        let value: Vec<u32> = load(&store, "missing", vec![7]);

        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_load_corrupt_returns_default() {
        let mut store = MemoryStore::new();
        store.write("numbers", "{not json").unwrap();

        let value: Vec<u32> = load(&store, "numbers", Vec::new());

        assert!(value.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_returns_default() {
        let mut store = MemoryStore::new();
        store.write("flag", "\"yes\"").unwrap();

        let value: bool = load(&store, "flag", false);

        assert!(!value);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();

        save(&mut store, "numbers", &vec![1, 2, 3]).unwrap();
        let value: Vec<u32> = load(&store, "numbers", Vec::new());

        assert_eq!(value, vec![1, 2, 3]);
    }
}
