//! Settings service
//!
//! Manages user preferences stored beside the note collections.

use crate::config::THEME_KEY;
use crate::error::Result;
use crate::storage::{self, KeyValueStore};

/// User preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Preferences {
    /// Load preferences from the store, defaulting to light mode
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            dark_mode: storage::load(store, THEME_KEY, false),
        }
    }

    /// Save preferences to the store
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        storage::save(store, THEME_KEY, &self.dark_mode)?;
        tracing::info!("Preferences saved (dark mode: {})", self.dark_mode);
        Ok(())
    }

    /// Flip dark mode and persist. Returns the new value.
    pub fn toggle_dark_mode<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Result<bool> {
        self.dark_mode = !self.dark_mode;
        self.save(store)?;
        Ok(self.dark_mode)
    }
}
