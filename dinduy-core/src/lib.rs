//! Dinduy core library
//!
//! State and interaction core of the Dinduy personal notes application:
//! the note and folder collections with their persistence, search, backup,
//! the note editor, and the gesture and selection logic behind the
//! dashboard. Rendering is left to the host.

pub mod app;
pub mod config;
pub mod error;
pub mod interaction;
pub mod logging;
pub mod services;
pub mod state;
pub mod storage;
