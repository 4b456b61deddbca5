//! Editor service
//!
//! Field edits and formatting for the single open note. There is no save
//! step: every edit goes straight through [`NoteBook::update_note`] and is
//! persisted before the call returns.

use crate::error::{AppError, Result};
use crate::state::{Color, Icon, NoteBook, NotePatch, Shape};
use crate::storage::KeyValueStore;
use std::ops::Range;

/// Formatting commands offered by the editor toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    UnorderedList,
    /// Turn the current block into a heading
    Heading,
}

impl FormatCommand {
    /// Name of the host's inline editing command
    pub fn command_name(self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::UnorderedList => "insertUnorderedList",
            FormatCommand::Heading => "formatBlock",
        }
    }

    /// Argument passed along with the command, if any
    pub fn command_value(self) -> Option<&'static str> {
        match self {
            FormatCommand::Heading => Some("H2"),
            _ => None,
        }
    }
}

/// The focused rich-text editing surface owned by the host.
///
/// The surface applies a command to its current selection in place; the
/// editor then reads the resulting markup back and persists it.
pub trait FormattingSurface {
    fn exec_command(&mut self, command: FormatCommand) -> Result<()>;

    /// Current markup of the whole surface
    fn markup(&self) -> String;
}

/// Plain markup surface with a byte-range selection.
///
/// Wraps the selection in the element matching each command. Useful for
/// hosts without a native rich-text widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSurface {
    markup: String,
    selection: Range<usize>,
}

impl HtmlSurface {
    pub fn new(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let end = markup.len();
        Self {
            markup,
            selection: end..end,
        }
    }

    /// Select a byte range of the markup
    pub fn select(&mut self, range: Range<usize>) -> Result<()> {
        let valid = range.start <= range.end
            && range.end <= self.markup.len()
            && self.markup.is_char_boundary(range.start)
            && self.markup.is_char_boundary(range.end);

        if !valid {
            return Err(AppError::Generic(format!(
                "Invalid selection {:?} for markup of {} bytes",
                range,
                self.markup.len()
            )));
        }

        self.selection = range;
        Ok(())
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }
}

impl FormattingSurface for HtmlSurface {
    fn exec_command(&mut self, command: FormatCommand) -> Result<()> {
        let (open, close) = match command {
            FormatCommand::Bold => ("<b>", "</b>"),
            FormatCommand::Italic => ("<i>", "</i>"),
            FormatCommand::UnorderedList => ("<ul><li>", "</li></ul>"),
            FormatCommand::Heading => ("<h2>", "</h2>"),
        };

        let Range { start, end } = self.selection.clone();
        self.markup.insert_str(end, close);
        self.markup.insert_str(start, open);

        // Keep the same text selected, now inside the new element
        self.selection = start + open.len()..end + open.len();
        Ok(())
    }

    fn markup(&self) -> String {
        self.markup.clone()
    }
}

/// Controller for the open note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    note_id: String,
}

impl Editor {
    pub fn new(note_id: impl Into<String>) -> Self {
        Self {
            note_id: note_id.into(),
        }
    }

    pub fn note_id(&self) -> &str {
        &self.note_id
    }

    /// Merge arbitrary fields into the open note
    pub fn set_field<S: KeyValueStore>(
        &self,
        notebook: &mut NoteBook<S>,
        patch: NotePatch,
    ) -> Result<bool> {
        notebook.update_note(&self.note_id, patch)
    }

    pub fn set_title<S: KeyValueStore>(
        &self,
        notebook: &mut NoteBook<S>,
        title: &str,
    ) -> Result<bool> {
        self.set_field(notebook, NotePatch::title(title))
    }

    /// Persist markup typed into the editing surface
    pub fn set_content<S: KeyValueStore>(
        &self,
        notebook: &mut NoteBook<S>,
        markup: &str,
    ) -> Result<bool> {
        self.set_field(notebook, NotePatch::content(markup))
    }

    pub fn set_color<S: KeyValueStore>(
        &self,
        notebook: &mut NoteBook<S>,
        color: Color,
    ) -> Result<bool> {
        self.set_field(notebook, NotePatch::color(color))
    }

    pub fn set_shape<S: KeyValueStore>(
        &self,
        notebook: &mut NoteBook<S>,
        shape: Shape,
    ) -> Result<bool> {
        self.set_field(notebook, NotePatch::shape(shape))
    }

    pub fn set_icon<S: KeyValueStore>(
        &self,
        notebook: &mut NoteBook<S>,
        icon: Icon,
    ) -> Result<bool> {
        self.set_field(notebook, NotePatch::icon(icon))
    }

    /// Move the note to a folder, or to the dashboard root with `None`
    pub fn move_to<S: KeyValueStore>(
        &self,
        notebook: &mut NoteBook<S>,
        folder_id: Option<&str>,
    ) -> Result<bool> {
        tracing::info!("Moving note {} to {:?}", self.note_id, folder_id);
        self.set_field(notebook, NotePatch::folder(folder_id.map(str::to_string)))
    }

    /// Delete the open note. Consumes the editor, which has nothing left
    /// to edit.
    pub fn delete<S: KeyValueStore>(self, notebook: &mut NoteBook<S>) -> Result<bool> {
        notebook.delete_note(&self.note_id)
    }

    /// Apply `command` on the surface and persist the resulting markup
    pub fn format<S: KeyValueStore, F: FormattingSurface + ?Sized>(
        &self,
        notebook: &mut NoteBook<S>,
        surface: &mut F,
        command: FormatCommand,
    ) -> Result<bool> {
        tracing::debug!(
            "Formatting note {} with {}",
            self.note_id,
            command.command_name()
        );

        surface.exec_command(command)?;
        self.set_content(notebook, &surface.markup())
    }
}
