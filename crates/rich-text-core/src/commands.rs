//! Command layer.
//!
//! A serializable-shaped mirror of the [`Document`] API: hosts that route input through a
//! single dispatch point build a [`Command`] and hand it to [`Document::execute`].
//!
//! # Example
//!
//! ```rust
//! use rich_text_core::{Command, CommandResult, Document, EditCommand, QueryCommand};
//!
//! let mut doc = Document::empty();
//! doc.execute(Command::Edit(EditCommand::InsertText { text: "Hello".into() }))
//!     .unwrap();
//!
//! let result = doc.execute(Command::Query(QueryCommand::Text)).unwrap();
//! assert!(matches!(result, CommandResult::Text(text) if text == "Hello"));
//! ```

use crate::document::Document;
use crate::position::{Position, Range};
use crate::rich_spans::{RichSpanId, RichSpanStyle};
use crate::search::{SearchError, SearchOptions};
use crate::style::StyleAttributes;
use crate::text::StyledText;
use thiserror::Error;

/// Text editing commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Type plain text at the caret, replacing the selection if any
    InsertText {
        /// Text to insert.
        text: String,
    },
    /// Insert styled text at the caret, replacing the selection if any
    InsertStyled {
        /// Text to insert.
        text: StyledText,
    },
    /// Delete the selection or the grapheme before the caret
    Backspace,
    /// Delete the selection or the grapheme after the caret
    DeleteForward,
    /// Delete a range
    DeleteRange {
        /// Range to delete.
        range: Range,
    },
    /// Replace a range
    Replace {
        /// Range to replace.
        range: Range,
        /// Replacement text.
        text: StyledText,
        /// Whether the new text inherits the replaced text's style.
        inherit_style: bool,
    },
    /// Undo last edit
    Undo,
    /// Redo last undone edit
    Redo,
}

/// Cursor and selection commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorCommand {
    /// Move the caret to a position (clamped)
    MoveTo {
        /// Target position.
        position: Position,
    },
    /// Move one grapheme left
    MoveLeft,
    /// Move one grapheme right
    MoveRight,
    /// Set the selection
    SetSelection {
        /// Range to select.
        range: Range,
    },
    /// Select the whole document
    SelectAll,
    /// Clear the selection
    ClearSelection,
}

/// Inline style commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleCommand {
    /// Add a style over a range
    AddStyle {
        /// Styled range.
        range: Range,
        /// Attributes to add.
        attributes: StyleAttributes,
    },
    /// Remove a style from a range
    RemoveStyle {
        /// Styled range.
        range: Range,
        /// Attributes to remove.
        attributes: StyleAttributes,
    },
    /// Re-tag spans carrying the old default style
    RetagDefaultStyle {
        /// Attributes to replace.
        old: StyleAttributes,
        /// Replacement attributes.
        new: StyleAttributes,
    },
}

/// Rich span commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichSpanCommand {
    /// Add a rich span
    Add {
        /// Span range.
        range: Range,
        /// Style tag.
        style: RichSpanStyle,
    },
    /// Remove a rich span by id
    Remove {
        /// Span id.
        id: RichSpanId,
    },
    /// Remove rich spans with exactly this range and style
    RemoveMatching {
        /// Span range.
        range: Range,
        /// Style tag.
        style: RichSpanStyle,
    },
    /// Remove every rich span with a style tag
    Clear {
        /// Style tag.
        style: RichSpanStyle,
    },
    /// Add a rich span over every match of a query
    HighlightMatches {
        /// Search query.
        query: String,
        /// Search options.
        options: SearchOptions,
        /// Style tag for the new spans.
        style: RichSpanStyle,
    },
}

/// Read-only commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCommand {
    /// Full plain text
    Text,
    /// Plain text of a range
    TextInRange {
        /// Range to read.
        range: Range,
    },
    /// Caret position
    Cursor,
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text editing commands
    Edit(EditCommand),
    /// Cursor command
    Cursor(CursorCommand),
    /// Style command
    Style(StyleCommand),
    /// Rich span command
    RichSpan(RichSpanCommand),
    /// Query command
    Query(QueryCommand),
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Success, no return value
    Success,
    /// Success, returns text
    Text(String),
    /// Success, returns position
    Position(Position),
    /// A rich span was added
    RichSpanAdded(RichSpanId),
    /// Number of rich spans removed
    RichSpansRemoved(usize),
    /// Number of search matches highlighted
    SearchMatches(usize),
}

/// Command error type
#[derive(Debug, Error)]
pub enum CommandError {
    /// Undo requested with an empty undo stack
    #[error("nothing to undo")]
    NothingToUndo,
    /// Redo requested with an empty redo stack
    #[error("nothing to redo")]
    NothingToRedo,
    /// Range is empty or inverted
    #[error("invalid range: {start:?}..{end:?}")]
    InvalidRange {
        /// Range start.
        start: Position,
        /// Range end.
        end: Position,
    },
    /// Search failed
    #[error(transparent)]
    Search(#[from] SearchError),
}

fn require_valid(range: Range) -> Result<Range, CommandError> {
    if range.is_valid() {
        Ok(range)
    } else {
        Err(CommandError::InvalidRange {
            start: range.start,
            end: range.end,
        })
    }
}

impl Document {
    /// Execute a command.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        match command {
            Command::Edit(command) => self.execute_edit(command),
            Command::Cursor(command) => Ok(self.execute_cursor(command)),
            Command::Style(command) => self.execute_style(command),
            Command::RichSpan(command) => self.execute_rich_span(command),
            Command::Query(command) => Ok(self.execute_query(command)),
        }
    }

    fn execute_edit(&mut self, command: EditCommand) -> Result<CommandResult, CommandError> {
        match command {
            EditCommand::InsertText { text } => self.insert_text(&text),
            EditCommand::InsertStyled { text } => self.insert_styled(text),
            EditCommand::Backspace => self.backspace(),
            EditCommand::DeleteForward => self.delete_forward(),
            EditCommand::DeleteRange { range } => self.delete_range(require_valid(range)?),
            EditCommand::Replace {
                range,
                text,
                inherit_style,
            } => self.replace_range(range, text, inherit_style),
            EditCommand::Undo => {
                if !self.undo() {
                    return Err(CommandError::NothingToUndo);
                }
            }
            EditCommand::Redo => {
                if !self.redo() {
                    return Err(CommandError::NothingToRedo);
                }
            }
        }
        Ok(CommandResult::Position(self.cursor()))
    }

    fn execute_cursor(&mut self, command: CursorCommand) -> CommandResult {
        match command {
            CursorCommand::MoveTo { position } => self.set_cursor(position),
            CursorCommand::MoveLeft => self.move_left(),
            CursorCommand::MoveRight => self.move_right(),
            CursorCommand::SetSelection { range } => self.set_selection(range),
            CursorCommand::SelectAll => self.select_all(),
            CursorCommand::ClearSelection => self.clear_selection(),
        }
        CommandResult::Position(self.cursor())
    }

    fn execute_style(&mut self, command: StyleCommand) -> Result<CommandResult, CommandError> {
        match command {
            StyleCommand::AddStyle { range, attributes } => {
                self.add_style(require_valid(range)?, attributes)
            }
            StyleCommand::RemoveStyle { range, attributes } => {
                self.remove_style(require_valid(range)?, attributes)
            }
            StyleCommand::RetagDefaultStyle { old, new } => self.retag_default_style(&old, new),
        }
        Ok(CommandResult::Success)
    }

    fn execute_rich_span(
        &mut self,
        command: RichSpanCommand,
    ) -> Result<CommandResult, CommandError> {
        let result = match command {
            RichSpanCommand::Add { range, style } => {
                let range = require_valid(range)?;
                let id = self.add_rich_span(range, style).ok_or(CommandError::InvalidRange {
                    start: range.start,
                    end: range.end,
                })?;
                CommandResult::RichSpanAdded(id)
            }
            RichSpanCommand::Remove { id } => {
                CommandResult::RichSpansRemoved(usize::from(self.remove_rich_span(id)))
            }
            RichSpanCommand::RemoveMatching { range, style } => {
                CommandResult::RichSpansRemoved(self.remove_rich_span_matching(range, style))
            }
            RichSpanCommand::Clear { style } => {
                CommandResult::RichSpansRemoved(self.clear_rich_spans(style))
            }
            RichSpanCommand::HighlightMatches {
                query,
                options,
                style,
            } => CommandResult::SearchMatches(self.highlight_matches(&query, options, style)?),
        };
        Ok(result)
    }

    fn execute_query(&self, command: QueryCommand) -> CommandResult {
        match command {
            QueryCommand::Text => CommandResult::Text(self.text()),
            QueryCommand::TextInRange { range } => {
                CommandResult::Text(self.text_in_range(range).text)
            }
            QueryCommand::Cursor => CommandResult::Position(self.cursor()),
        }
    }
}
