//! State module
//!
//! This module provides the entity model:
//! - Note and folder records with typed partial updates
//! - Palette lookup tables for card styling
//! - The `NoteBook` state owner that persists every mutation

pub mod models;
pub mod notebook;
pub mod palette;

pub use models::*;
pub use notebook::NoteBook;
pub use palette::{Color, Icon, Shape};
