//! Entity models
//!
//! Rust structs for the two persisted collections. Field names are
//! camelCase on the wire and `updatedAt` is epoch milliseconds, so stored
//! state and backup files stay readable by every client version.

use super::palette::{Color, Icon, Shape};
use crate::config::{DEFAULT_FOLDER_NAME, EMPTY_PREVIEW_LABEL, UNTITLED_LABEL};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A note with rich text content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    /// HTML markup as produced by the editing surface
    pub content: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub icon: Icon,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create an empty note, optionally filed under a folder
    pub fn new(folder_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            content: String::new(),
            folder_id,
            color: Color::Slate,
            shape: Shape::Petal,
            icon: Icon::FileText,
            updated_at: timestamp_now(),
        }
    }

    /// Merge `patch` into the note and stamp `updated_at`.
    ///
    /// The stamp never moves backwards, even if the wall clock does.
    pub fn apply(&mut self, patch: NotePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(folder_id) = patch.folder_id {
            self.folder_id = folder_id;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(shape) = patch.shape {
            self.shape = shape;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }

        self.updated_at = self.updated_at.max(now);
    }

    /// Title as shown on cards
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_LABEL
        } else {
            &self.title
        }
    }

    /// Visible text of the content, for the peek view
    pub fn preview_text(&self) -> String {
        let text = strip_tags(&self.content);
        let text = text.trim();

        if text.is_empty() {
            EMPTY_PREVIEW_LABEL.to_string()
        } else {
            text.to_string()
        }
    }
}

/// Partial update for a note. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` moves the note to the dashboard root
    pub folder_id: Option<Option<String>>,
    pub color: Option<Color>,
    pub shape: Option<Shape>,
    pub icon: Option<Icon>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn folder(folder_id: Option<String>) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..Self::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn shape(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    pub fn icon(icon: Icon) -> Self {
        Self {
            icon: Some(icon),
            ..Self::default()
        }
    }
}

/// A named grouping of notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub shape: Shape,
}

impl Folder {
    /// Create a folder with the default name and style
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: DEFAULT_FOLDER_NAME.to_string(),
            color: Color::Violet,
            shape: Shape::Petal,
        }
    }

    /// Folders present on first launch
    pub fn seeded() -> Vec<Folder> {
        vec![
            Folder {
                id: "1".to_string(),
                name: "Personal".to_string(),
                color: Color::Rose,
                shape: Shape::Petal,
            },
            Folder {
                id: "2".to_string(),
                name: "Work".to_string(),
                color: Color::Blue,
                shape: Shape::LeafRight,
            },
        ]
    }

    pub fn apply(&mut self, patch: FolderPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(shape) = patch.shape {
            self.shape = shape;
        }
    }
}

impl Default for Folder {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a folder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderPatch {
    pub name: Option<String>,
    pub color: Option<Color>,
    pub shape: Option<Shape>,
}

impl FolderPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn shape(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }
}

/// Current time at the precision `updatedAt` is stored with
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Replace every `<...>` tag with a space. An unterminated `<` is kept.
fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) if end > 0 => {
                out.push_str(&rest[..start]);
                out.push(' ');
                rest = &after[end + 1..];
            }
            _ => {
                out.push_str(&rest[..=start]);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
