//! Rich span tracking.
//!
//! Rich spans are out-of-band annotations over document-absolute ranges (highlights, search
//! matches, spell-check marks). Unlike inline [`StyleSpan`](crate::StyleSpan)s they may cross
//! line boundaries and overlap freely; they are never merged. The tracker keeps them
//! positioned correctly as the text around them is edited.

use crate::operation::Operation;
use crate::position::{Position, Range};
use crate::text::StyledText;
use std::collections::BTreeMap;
use tracing::trace;

/// Opaque rich span style tag, interpreted by the host.
pub type RichSpanStyle = u32;

/// Built-in tag for generic highlights.
pub const HIGHLIGHT_STYLE: RichSpanStyle = 0x0500_0001;
/// Built-in tag for search matches produced by `Document::highlight_matches`.
pub const SEARCH_MATCH_STYLE: RichSpanStyle = 0x0500_0002;
/// Built-in tag for words flagged by an external spell checker.
pub const SPELLING_ERROR_STYLE: RichSpanStyle = 0x0500_0003;

/// Stable identifier of a rich span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RichSpanId(pub u64);

impl RichSpanId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A multi-line annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RichSpan {
    /// Document-absolute range.
    pub range: Range,
    /// Style tag.
    pub style: RichSpanStyle,
}

impl RichSpan {
    /// Create a new rich span.
    pub fn new(range: Range, style: RichSpanStyle) -> Self {
        Self { range, style }
    }
}

/// Owner of every rich span in a document.
#[derive(Debug, Clone, Default)]
pub struct RichSpanTracker {
    spans: BTreeMap<RichSpanId, RichSpan>,
    next_id: u64,
}

impl RichSpanTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether no spans are tracked.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Look up a span by id.
    pub fn get(&self, id: RichSpanId) -> Option<&RichSpan> {
        self.spans.get(&id)
    }

    /// Iterate over all spans in id order.
    pub fn iter(&self) -> impl Iterator<Item = (RichSpanId, &RichSpan)> {
        self.spans.iter().map(|(id, span)| (*id, span))
    }

    /// Add a span over `range`. Returns `None` for an empty or inverted range.
    pub fn add_span(&mut self, range: Range, style: RichSpanStyle) -> Option<RichSpanId> {
        if !range.is_valid() {
            return None;
        }
        Some(self.insert(RichSpan::new(range, style)))
    }

    /// Re-insert a span under a known id (used when undo restores a span).
    pub(crate) fn insert_with_id(&mut self, id: RichSpanId, span: RichSpan) {
        if !span.range.is_valid() {
            return;
        }
        self.next_id = self.next_id.max(id.0 + 1);
        self.spans.insert(id, span);
    }

    fn insert(&mut self, span: RichSpan) -> RichSpanId {
        let id = RichSpanId(self.next_id);
        self.next_id += 1;
        self.spans.insert(id, span);
        id
    }

    /// Remove a span by id.
    pub fn remove_span(&mut self, id: RichSpanId) -> Option<RichSpan> {
        self.spans.remove(&id)
    }

    /// Remove every span with exactly this range and style. Returns how many were removed.
    pub fn remove_matching(&mut self, range: Range, style: RichSpanStyle) -> usize {
        let before = self.spans.len();
        self.spans
            .retain(|_, span| !(span.range == range && span.style == style));
        before - self.spans.len()
    }

    /// Remove every span carrying `style`. Returns how many were removed.
    pub fn remove_style(&mut self, style: RichSpanStyle) -> usize {
        let before = self.spans.len();
        self.spans.retain(|_, span| span.style != style);
        before - self.spans.len()
    }

    /// Remove all spans.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Spans intersecting `line`, or only the column segment `[start, end)` of it.
    pub fn spans_intersecting(
        &self,
        line: usize,
        segment: Option<(usize, usize)>,
    ) -> Vec<(RichSpanId, RichSpan)> {
        let (start, end) = segment.unwrap_or((0, usize::MAX));
        self.spans
            .iter()
            .filter(|(_, span)| span.range.intersects_line_segment(line, start, end))
            .map(|(id, span)| (*id, *span))
            .collect()
    }

    /// Spans that overlap or share an endpoint with `range`.
    pub fn spans_touching(&self, range: Range) -> Vec<(RichSpanId, RichSpan)> {
        self.spans
            .iter()
            .filter(|(_, span)| span.range.touches(&range))
            .map(|(id, span)| (*id, *span))
            .collect()
    }

    /// Reposition every span for an operation that has just been applied.
    ///
    /// Returns the ids of spans created by splitting an existing span.
    pub fn transform(&mut self, operation: &Operation) -> Vec<RichSpanId> {
        match operation {
            Operation::Insert { position, text, .. } => self.transform_insert(*position, text),
            Operation::Delete { range, .. } => {
                self.transform_delete(*range);
                Vec::new()
            }
            Operation::Replace {
                range, new_text, ..
            } => {
                self.transform_delete(*range);
                self.transform_insert(range.start, new_text)
            }
            Operation::StyleSpan { .. } => Vec::new(),
        }
    }

    fn transform_insert(&mut self, position: Position, text: &StyledText) -> Vec<RichSpanId> {
        if text.is_empty() {
            return Vec::new();
        }

        let after = text.end_position(position);
        let multi_line = text.contains_newline();
        let mut tails = Vec::new();

        for span in self.spans.values_mut() {
            let Range { start, end } = span.range;
            if !multi_line || position <= start {
                span.range = Range::new(
                    shift_for_insert(start, position, after),
                    shift_for_insert(end, position, after),
                );
            } else if position < end {
                span.range.end = position;
                tails.push(RichSpan::new(
                    Range::new(after, shift_for_insert(end, position, after)),
                    span.style,
                ));
            }
        }

        let created: Vec<RichSpanId> = tails
            .into_iter()
            .filter(|tail| tail.range.is_valid())
            .map(|tail| self.insert(tail))
            .collect();

        if !created.is_empty() {
            trace!(
                line = position.line,
                column = position.column,
                split = created.len(),
                "rich spans split by newline insertion"
            );
        }
        created
    }

    fn transform_delete(&mut self, range: Range) {
        if range.is_empty() {
            return;
        }

        let mut collapsed = Vec::new();
        for (id, span) in self.spans.iter_mut() {
            let start = shift_for_delete(span.range.start, range);
            let end = shift_for_delete(span.range.end, range);
            span.range = Range::new(start, end);
            if !span.range.is_valid() {
                collapsed.push(*id);
            }
        }

        for id in &collapsed {
            self.spans.remove(id);
        }

        if !collapsed.is_empty() {
            trace!(
                line = range.start.line,
                column = range.start.column,
                dropped = collapsed.len(),
                "rich spans collapsed by deletion"
            );
        }
    }
}

/// Where `position` ends up after inserting text at `at` that ends at `after`.
fn shift_for_insert(position: Position, at: Position, after: Position) -> Position {
    if position < at {
        position
    } else if position.line == at.line {
        Position::new(after.line, after.column + (position.column - at.column))
    } else {
        Position::new(position.line + (after.line - at.line), position.column)
    }
}

/// Where `position` ends up after deleting `range`.
fn shift_for_delete(position: Position, range: Range) -> Position {
    if position <= range.start {
        position
    } else if position < range.end {
        range.start
    } else if position.line == range.end.line {
        Position::new(
            range.start.line,
            range.start.column + (position.column - range.end.column),
        )
    } else {
        Position::new(
            position.line - (range.end.line - range.start.line),
            position.column,
        )
    }
}
