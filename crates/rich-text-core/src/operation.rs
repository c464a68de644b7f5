//! Edit operations and the bookkeeping needed to reverse them.
//!
//! Every change to a document is expressed as an [`Operation`]. When the change is recorded
//! for undo, the engine also captures an [`OperationMetadata`] describing what the operation
//! destroyed, so the history log can rebuild the prior state exactly.

use crate::position::{Position, Range};
use crate::rich_spans::{RichSpan, RichSpanId, RichSpanStyle};
use crate::style::{StyleAttributes, StyleSpan};
use crate::text::StyledText;

/// A reversible document edit.
///
/// Each variant carries the cursor position before and after the edit so that undo and redo
/// can restore the caret as well as the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert styled text (possibly containing newlines) at a position.
    Insert {
        /// Insertion point.
        position: Position,
        /// Inserted text with its own inline spans.
        text: StyledText,
        /// Caret before the edit.
        cursor_before: Position,
        /// Caret after the edit.
        cursor_after: Position,
    },
    /// Delete a range.
    Delete {
        /// Deleted range.
        range: Range,
        /// Caret before the edit.
        cursor_before: Position,
        /// Caret after the edit.
        cursor_after: Position,
    },
    /// Replace a range with new text.
    Replace {
        /// Replaced range.
        range: Range,
        /// Text previously in `range`.
        old_text: StyledText,
        /// Text written in its place.
        new_text: StyledText,
        /// Whether the new text picks up the style of the text it replaces.
        inherit_style: bool,
        /// Caret before the edit.
        cursor_before: Position,
        /// Caret after the edit.
        cursor_after: Position,
    },
    /// Add or remove an inline style over a range.
    StyleSpan {
        /// Styled range.
        range: Range,
        /// Attributes added or removed.
        attributes: StyleAttributes,
        /// `true` to add the style, `false` to remove it.
        is_add: bool,
        /// Caret before the edit.
        cursor_before: Position,
        /// Caret after the edit.
        cursor_after: Position,
    },
}

impl Operation {
    /// Insert `text` at `position`; the caret lands after the inserted text.
    pub fn insert(position: Position, text: impl Into<StyledText>) -> Self {
        let text = text.into();
        let cursor_after = text.end_position(position);
        Operation::Insert {
            position,
            text,
            cursor_before: position,
            cursor_after,
        }
    }

    /// Delete `range`; the caret lands at its start.
    pub fn delete(range: Range) -> Self {
        Operation::Delete {
            range,
            cursor_before: range.end,
            cursor_after: range.start,
        }
    }

    /// Replace `range` (currently holding `old_text`) with `new_text`.
    pub fn replace(
        range: Range,
        old_text: StyledText,
        new_text: impl Into<StyledText>,
        inherit_style: bool,
    ) -> Self {
        let new_text = new_text.into();
        let cursor_after = new_text.end_position(range.start);
        Operation::Replace {
            range,
            old_text,
            new_text,
            inherit_style,
            cursor_before: range.end,
            cursor_after,
        }
    }

    /// Add (`is_add`) or remove `attributes` over `range`; the caret does not move.
    pub fn style(range: Range, attributes: StyleAttributes, is_add: bool) -> Self {
        Operation::StyleSpan {
            range,
            attributes,
            is_add,
            cursor_before: range.end,
            cursor_after: range.end,
        }
    }

    /// Return a copy with explicit caret positions.
    pub fn with_cursors(mut self, before: Position, after: Position) -> Self {
        match &mut self {
            Operation::Insert {
                cursor_before,
                cursor_after,
                ..
            }
            | Operation::Delete {
                cursor_before,
                cursor_after,
                ..
            }
            | Operation::Replace {
                cursor_before,
                cursor_after,
                ..
            }
            | Operation::StyleSpan {
                cursor_before,
                cursor_after,
                ..
            } => {
                *cursor_before = before;
                *cursor_after = after;
            }
        }
        self
    }

    /// Caret position before the edit.
    pub fn cursor_before(&self) -> Position {
        match self {
            Operation::Insert { cursor_before, .. }
            | Operation::Delete { cursor_before, .. }
            | Operation::Replace { cursor_before, .. }
            | Operation::StyleSpan { cursor_before, .. } => *cursor_before,
        }
    }

    /// Caret position after the edit.
    pub fn cursor_after(&self) -> Position {
        match self {
            Operation::Insert { cursor_after, .. }
            | Operation::Delete { cursor_after, .. }
            | Operation::Replace { cursor_after, .. }
            | Operation::StyleSpan { cursor_after, .. } => *cursor_after,
        }
    }

    /// Short name of the variant, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Insert { .. } => "insert",
            Operation::Delete { .. } => "delete",
            Operation::Replace { .. } => "replace",
            Operation::StyleSpan { .. } => "style",
        }
    }

    /// Whether the operation changes text (as opposed to styling only).
    pub fn modifies_text(&self) -> bool {
        !matches!(self, Operation::StyleSpan { .. })
    }

    /// Position that preserved rich spans are stored relative to.
    pub fn anchor(&self) -> Position {
        match self {
            Operation::Insert { position, .. } => *position,
            Operation::Delete { range, .. }
            | Operation::Replace { range, .. }
            | Operation::StyleSpan { range, .. } => range.start,
        }
    }

    /// Lines touched by the operation, in the document as it was before the edit.
    pub(crate) fn lines_before(&self) -> std::ops::RangeInclusive<usize> {
        match self {
            Operation::Insert { position, .. } => position.line..=position.line,
            Operation::Delete { range, .. }
            | Operation::Replace { range, .. }
            | Operation::StyleSpan { range, .. } => range.start.line..=range.end.line,
        }
    }

    /// Build the operation that reverses `self`, given the metadata captured when it ran.
    pub fn inverse(&self, metadata: &OperationMetadata) -> Operation {
        let before = self.cursor_after();
        let after = self.cursor_before();

        let inverse = match self {
            Operation::Insert { position, text, .. } => {
                Operation::delete(Range::new(*position, text.end_position(*position)))
            }
            Operation::Delete { range, .. } => {
                let text = metadata.deleted_text.clone().unwrap_or_default();
                Operation::insert(range.start, text)
            }
            Operation::Replace {
                range,
                old_text,
                new_text,
                ..
            } => {
                let restored = metadata
                    .deleted_text
                    .clone()
                    .unwrap_or_else(|| old_text.clone());
                let written = Range::new(range.start, new_text.end_position(range.start));
                Operation::replace(written, new_text.clone(), restored, false)
            }
            Operation::StyleSpan {
                range,
                attributes,
                is_add,
                ..
            } => Operation::style(*range, attributes.clone(), !is_add),
        };

        inverse.with_cursors(before, after)
    }
}

/// A position stored relative to an operation's anchor.
///
/// On the anchor line the column is a delta from the anchor column; on any other line it is
/// absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelativePosition {
    /// Lines below (positive) or above (negative) the anchor.
    pub line_offset: isize,
    /// Column delta on the anchor line, absolute column elsewhere.
    pub column: isize,
}

impl RelativePosition {
    /// Express `position` relative to `anchor`.
    pub fn between(anchor: Position, position: Position) -> Self {
        let line_offset = position.line as isize - anchor.line as isize;
        let column = if line_offset == 0 {
            position.column as isize - anchor.column as isize
        } else {
            position.column as isize
        };
        Self {
            line_offset,
            column,
        }
    }

    /// Resolve back to an absolute position; negative results saturate at zero.
    pub fn resolve(&self, anchor: Position) -> Position {
        let line = (anchor.line as isize + self.line_offset).max(0) as usize;
        let column = if self.line_offset == 0 {
            anchor.column as isize + self.column
        } else {
            self.column
        };
        Position::new(line, column.max(0) as usize)
    }
}

/// A rich span captured before an operation touched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreservedRichSpan {
    /// Identifier the span had (and gets back on undo).
    pub id: RichSpanId,
    /// Start relative to the operation anchor.
    pub start: RelativePosition,
    /// End relative to the operation anchor.
    pub end: RelativePosition,
    /// Span style tag.
    pub style: RichSpanStyle,
}

impl PreservedRichSpan {
    /// Capture `span` relative to `anchor`.
    pub fn capture(id: RichSpanId, span: &RichSpan, anchor: Position) -> Self {
        Self {
            id,
            start: RelativePosition::between(anchor, span.range.start),
            end: RelativePosition::between(anchor, span.range.end),
            style: span.style,
        }
    }

    /// Rebuild the span at `anchor`.
    pub fn restore(&self, anchor: Position) -> RichSpan {
        RichSpan::new(
            Range::new(self.start.resolve(anchor), self.end.resolve(anchor)),
            self.style,
        )
    }
}

/// Inline spans of a run of consecutive lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineSpansSnapshot {
    /// Index of the first captured line.
    pub first_line: usize,
    /// Spans of each captured line, in order.
    pub spans: Vec<Vec<StyleSpan>>,
}

/// Data captured while applying an operation, used to reverse it.
///
/// Only `created_rich_spans` is filled in when history recording is off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationMetadata {
    /// Styled text removed by a delete or replace.
    pub deleted_text: Option<StyledText>,
    /// Rich spans that touched the affected range, relative to the operation anchor.
    pub preserved_rich_spans: Vec<PreservedRichSpan>,
    /// Inline spans of the touched lines before the edit.
    pub line_spans_before: Option<LineSpansSnapshot>,
    /// Rich spans created by splitting an existing span.
    pub created_rich_spans: Vec<RichSpanId>,
}

impl OperationMetadata {
    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.deleted_text.is_none()
            && self.preserved_rich_spans.is_empty()
            && self.line_spans_before.is_none()
            && self.created_rich_spans.is_empty()
    }
}
