//! Document facade.
//!
//! [`Document`] is the public entry point: it owns the line buffer, rich spans, history,
//! caret and selection, turns high-level editing calls into [`Operation`]s, and notifies
//! subscribers after each change.
//!
//! # Example
//!
//! ```rust
//! use rich_text_core::{Document, Position, Range, StyleAttributes};
//!
//! let mut doc = Document::new("Hello World");
//! doc.add_style(Range::on_line(0, 0, 5), StyleAttributes::bold());
//! doc.set_cursor(Position::new(0, 11));
//! doc.insert_text("!");
//!
//! assert_eq!(doc.text(), "Hello World!");
//! assert!(doc.undo());
//! assert_eq!(doc.text(), "Hello World");
//! ```

use crate::buffer::{Line, LineBuffer};
use crate::config::DocumentConfig;
use crate::engine::EditEngine;
use crate::history::History;
use crate::operation::Operation;
use crate::position::{Position, Range};
use crate::rich_spans::{RichSpan, RichSpanId, RichSpanStyle, RichSpanTracker};
use crate::search::{self, SearchError, SearchOptions};
use crate::state::{ChangeNotifier, StateChange, StateChangeType, SubscriptionId};
use crate::style::{StyleAttributes, StyleSpan};
use crate::text::{self, StyledText};
use std::sync::Arc;
use tracing::debug;

/// An editable styled document.
#[derive(Debug)]
pub struct Document {
    engine: EditEngine,
    history: History,
    cursor: Position,
    selection: Option<Range>,
    config: DocumentConfig,
    notifier: ChangeNotifier,
}

impl Document {
    /// Create a document from plain text with the default configuration.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, DocumentConfig::default())
    }

    /// Create a document from plain text.
    pub fn with_config(text: &str, config: DocumentConfig) -> Self {
        Self::from_buffer(LineBuffer::from_text(text), config)
    }

    /// Create a document holding a single empty line.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Create a document from styled text.
    pub fn from_styled(text: &StyledText, config: DocumentConfig) -> Self {
        Self::from_buffer(LineBuffer::from_styled(text), config)
    }

    fn from_buffer(buffer: LineBuffer, config: DocumentConfig) -> Self {
        Self {
            engine: EditEngine::new(buffer),
            history: History::new(config.max_history_size),
            cursor: Position::default(),
            selection: None,
            config,
            notifier: ChangeNotifier::default(),
        }
    }

    // ----- queries -----

    /// Configuration in effect.
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// The underlying line buffer.
    pub fn buffer(&self) -> &LineBuffer {
        self.engine.buffer()
    }

    /// Full plain text, lines joined with `'\n'`.
    pub fn text(&self) -> String {
        self.buffer().text()
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.buffer().line_count()
    }

    /// Number of characters, counting one newline per line boundary.
    pub fn char_count(&self) -> usize {
        self.buffer().char_count()
    }

    /// Line at `index`.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.buffer().line(index)
    }

    /// All lines.
    pub fn lines(&self) -> &[Line] {
        self.buffer().lines()
    }

    /// Caret position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Current selection, if any.
    pub fn selection(&self) -> Option<Range> {
        self.selection
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of undoable edits.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Number of redoable edits.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Current version; incremented by every change.
    pub fn version(&self) -> u64 {
        self.notifier.version()
    }

    /// Check if state has changed since a version
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.notifier.version() > version
    }

    /// Flat character index of `position` (clamped).
    pub fn position_to_index(&self, position: Position) -> usize {
        self.buffer().position_to_index(position)
    }

    /// Position of flat character index `index` (clamped).
    pub fn index_to_position(&self, index: usize) -> Position {
        self.buffer().index_to_position(index)
    }

    /// Styled text covered by `range`.
    pub fn text_in_range(&self, range: Range) -> StyledText {
        self.buffer().styled_text(range)
    }

    /// Inline spans covering the character at `position`.
    pub fn styles_at(&self, position: Position) -> Vec<StyleSpan> {
        self.line(position.line)
            .map(|line| {
                line.spans()
                    .iter()
                    .filter(|span| span.contains(position.column))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attributes in effect at `position`: the default style merged with every covering span.
    pub fn effective_style_at(&self, position: Position) -> StyleAttributes {
        self.styles_at(position)
            .iter()
            .fold(self.config.default_style.clone(), |acc, span| {
                acc.merge(&span.attributes)
            })
    }

    /// Inline spans overlapping `range`, paired with their line index.
    pub fn styles_in_range(&self, range: Range) -> Vec<(usize, StyleSpan)> {
        let range = self.buffer().clamp_range(range);
        let mut out = Vec::new();

        for line_idx in range.start.line..=range.end.line {
            let Some(line) = self.line(line_idx) else {
                break;
            };
            let start = if line_idx == range.start.line {
                range.start.column
            } else {
                0
            };
            let end = if line_idx == range.end.line {
                range.end.column
            } else {
                line.len()
            };
            out.extend(
                line.spans()
                    .iter()
                    .filter(|span| span.overlaps(start, end))
                    .map(|span| (line_idx, span.clone())),
            );
        }

        out
    }

    /// The rich span tracker.
    pub fn rich_spans(&self) -> &RichSpanTracker {
        self.engine.rich_spans()
    }

    /// Rich span by id.
    pub fn rich_span(&self, id: RichSpanId) -> Option<RichSpan> {
        self.engine.rich_spans().get(id).copied()
    }

    /// Rich spans intersecting `line`, or only the column segment `[start, end)` of it.
    pub fn rich_spans_intersecting(
        &self,
        line: usize,
        segment: Option<(usize, usize)>,
    ) -> Vec<(RichSpanId, RichSpan)> {
        self.engine.rich_spans().spans_intersecting(line, segment)
    }

    /// Range of every word, using Unicode word boundaries.
    ///
    /// Intended for an external spell checker, which can mark misspellings with
    /// [`add_rich_span`](Self::add_rich_span) and
    /// [`SPELLING_ERROR_STYLE`](crate::SPELLING_ERROR_STYLE).
    pub fn word_ranges(&self) -> Vec<Range> {
        self.lines()
            .iter()
            .enumerate()
            .flat_map(|(line_idx, line)| {
                text::word_columns(line.text())
                    .into_iter()
                    .map(move |(start, end)| Range::on_line(line_idx, start, end))
            })
            .collect()
    }

    /// Next match of `query` at or after the caret.
    pub fn find_next(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<Option<Range>, SearchError> {
        let text = self.text();
        let from = self.position_to_index(self.cursor);
        let found = search::find_next(&text, query, options, from)?;
        Ok(found.map(|m| {
            Range::new(self.index_to_position(m.start), self.index_to_position(m.end))
        }))
    }

    // ----- caret and selection -----

    /// Move the caret (clamped) and drop the selection.
    pub fn set_cursor(&mut self, position: Position) {
        let position = self.buffer().clamp_position(position);
        self.move_cursor_to(position);
    }

    /// Move the caret one grapheme cluster left, wrapping to the previous line.
    ///
    /// With a selection, the caret collapses to the selection start instead.
    pub fn move_left(&mut self) {
        let target = match self.selection {
            Some(selection) => selection.start,
            None => self.prev_position(self.cursor),
        };
        self.move_cursor_to(target);
    }

    /// Move the caret one grapheme cluster right, wrapping to the next line.
    ///
    /// With a selection, the caret collapses to the selection end instead.
    pub fn move_right(&mut self) {
        let target = match self.selection {
            Some(selection) => selection.end,
            None => self.next_position(self.cursor),
        };
        self.move_cursor_to(target);
    }

    fn move_cursor_to(&mut self, position: Position) {
        if self.selection.take().is_some() {
            self.cursor = position;
            self.notifier.publish(StateChangeType::SelectionChanged, None);
        } else if self.cursor != position {
            self.cursor = position;
            self.notifier.publish(StateChangeType::CursorMoved, None);
        }
    }

    /// Select `range`; the caret moves to its end. Empty or inverted ranges are ignored.
    pub fn set_selection(&mut self, range: Range) {
        if !range.is_valid() {
            return;
        }
        let range = self.buffer().clamp_range(range);
        if !range.is_valid() || self.selection == Some(range) {
            return;
        }
        self.selection = Some(range);
        self.cursor = range.end;
        self.notifier.publish(StateChangeType::SelectionChanged, None);
    }

    /// Select the whole document (no-op when it is empty).
    pub fn select_all(&mut self) {
        let end = self.buffer().end_position();
        self.set_selection(Range::new(Position::default(), end));
    }

    /// Drop the selection, keeping the caret where it is.
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.notifier.publish(StateChangeType::SelectionChanged, None);
        }
    }

    fn prev_position(&self, position: Position) -> Position {
        let position = self.buffer().clamp_position(position);
        if position.column > 0 {
            let line_text = self.line(position.line).map(Line::text).unwrap_or_default();
            Position::new(
                position.line,
                text::prev_grapheme_column(line_text, position.column),
            )
        } else if position.line > 0 {
            let line = position.line - 1;
            Position::new(line, self.buffer().line_len(line))
        } else {
            position
        }
    }

    fn next_position(&self, position: Position) -> Position {
        let position = self.buffer().clamp_position(position);
        let line_len = self.buffer().line_len(position.line);
        if position.column < line_len {
            let line_text = self.line(position.line).map(Line::text).unwrap_or_default();
            Position::new(
                position.line,
                text::next_grapheme_column(line_text, position.column),
            )
        } else if position.line + 1 < self.line_count() {
            Position::new(position.line + 1, 0)
        } else {
            position
        }
    }

    // ----- edits -----

    /// Type plain text at the caret, replacing the selection if there is one.
    pub fn insert_text(&mut self, text: &str) {
        self.insert_styled(StyledText::plain(text));
    }

    /// Type a single character at the caret, replacing the selection if there is one.
    pub fn insert_char(&mut self, ch: char) {
        self.insert_styled(StyledText::plain(ch.to_string()));
    }

    /// Insert styled text at the caret (e.g. a paste).
    ///
    /// With a selection, the selection is replaced and the new text inherits the style of the
    /// text it replaces.
    pub fn insert_styled(&mut self, text: StyledText) {
        match self.selection {
            Some(selection) => {
                let old_text = self.text_in_range(selection);
                self.commit(Operation::replace(selection, old_text, text, true));
            }
            None if text.is_empty() => {}
            None => self.commit(Operation::insert(self.cursor, text)),
        }
    }

    /// Delete the selection, or the grapheme cluster before the caret.
    pub fn backspace(&mut self) {
        if let Some(selection) = self.selection {
            self.commit(Operation::delete(selection));
            return;
        }

        let cursor = self.buffer().clamp_position(self.cursor);
        let start = self.prev_position(cursor);
        if start < cursor {
            self.commit(Operation::delete(Range::new(start, cursor)).with_cursors(cursor, start));
        }
    }

    /// Delete the selection, or the grapheme cluster after the caret.
    pub fn delete_forward(&mut self) {
        if let Some(selection) = self.selection {
            self.commit(Operation::delete(selection));
            return;
        }

        let cursor = self.buffer().clamp_position(self.cursor);
        let end = self.next_position(cursor);
        if cursor < end {
            self.commit(Operation::delete(Range::new(cursor, end)).with_cursors(cursor, cursor));
        }
    }

    /// Delete `range`. Empty ranges are ignored.
    pub fn delete_range(&mut self, range: Range) {
        let range = self.buffer().clamp_range(range);
        if range.is_valid() {
            self.commit(Operation::delete(range));
        }
    }

    /// Replace `range` with `text`.
    pub fn replace_range(&mut self, range: Range, text: impl Into<StyledText>, inherit_style: bool) {
        let text = text.into();
        let range = self.buffer().clamp_range(range);
        if range.is_empty() && text.is_empty() {
            return;
        }
        let old_text = self.text_in_range(range);
        self.commit(Operation::replace(range, old_text, text, inherit_style));
    }

    /// Apply `attributes` over `range`. The caret and selection are left alone.
    pub fn add_style(&mut self, range: Range, attributes: StyleAttributes) {
        self.restyle(range, attributes, true);
    }

    /// Remove `attributes` from `range`. The caret and selection are left alone.
    pub fn remove_style(&mut self, range: Range, attributes: StyleAttributes) {
        self.restyle(range, attributes, false);
    }

    fn restyle(&mut self, range: Range, attributes: StyleAttributes, is_add: bool) {
        let range = self.buffer().clamp_range(range);
        if range.is_valid() {
            let cursor = self.cursor;
            self.commit(Operation::style(range, attributes, is_add).with_cursors(cursor, cursor));
        }
    }

    /// Apply an arbitrary operation, recording it for undo.
    pub fn apply(&mut self, operation: Operation) {
        self.commit(operation);
    }

    fn commit(&mut self, operation: Operation) {
        let operation = self.engine.clamp_operation(operation);
        let metadata = self.engine.apply(&operation, true);

        let change_type = if operation.modifies_text() {
            self.selection = None;
            StateChangeType::DocumentModified
        } else {
            StateChangeType::StyleChanged
        };
        self.cursor = self.buffer().clamp_position(operation.cursor_after());

        let shared = Arc::new(operation.clone());
        self.history.record(operation, metadata);
        self.notifier.publish(change_type, Some(shared));
    }

    // ----- history -----

    /// Undo the most recent edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.engine) {
            Some(inverse) => {
                self.after_history_step(inverse);
                true
            }
            None => false,
        }
    }

    /// Redo the most recently undone edit. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.engine) {
            Some(operation) => {
                self.after_history_step(operation);
                true
            }
            None => false,
        }
    }

    fn after_history_step(&mut self, applied: Operation) {
        self.selection = None;
        self.cursor = self.buffer().clamp_position(applied.cursor_after());
        let change_type = if applied.modifies_text() {
            StateChangeType::DocumentModified
        } else {
            StateChangeType::StyleChanged
        };
        self.notifier.publish(change_type, Some(Arc::new(applied)));
    }

    // ----- rich spans -----

    /// Add a rich span over `range` (clamped). Returns `None` for an empty range.
    pub fn add_rich_span(&mut self, range: Range, style: RichSpanStyle) -> Option<RichSpanId> {
        let range = self.buffer().clamp_range(range);
        let id = self.engine.rich_spans_mut().add_span(range, style)?;
        self.notifier.publish(StateChangeType::RichSpansChanged, None);
        Some(id)
    }

    /// Remove a rich span by id.
    pub fn remove_rich_span(&mut self, id: RichSpanId) -> bool {
        let removed = self.engine.rich_spans_mut().remove_span(id).is_some();
        if removed {
            self.notifier.publish(StateChangeType::RichSpansChanged, None);
        }
        removed
    }

    /// Remove every rich span with exactly this range and style.
    pub fn remove_rich_span_matching(&mut self, range: Range, style: RichSpanStyle) -> usize {
        let removed = self.engine.rich_spans_mut().remove_matching(range, style);
        if removed > 0 {
            self.notifier.publish(StateChangeType::RichSpansChanged, None);
        }
        removed
    }

    /// Remove every rich span carrying `style`.
    pub fn clear_rich_spans(&mut self, style: RichSpanStyle) -> usize {
        let removed = self.engine.rich_spans_mut().remove_style(style);
        if removed > 0 {
            self.notifier.publish(StateChangeType::RichSpansChanged, None);
        }
        removed
    }

    /// Add a rich span tagged `style` over every match of `query`. Returns the match count.
    pub fn highlight_matches(
        &mut self,
        query: &str,
        options: SearchOptions,
        style: RichSpanStyle,
    ) -> Result<usize, SearchError> {
        let text = self.text();
        let matches = search::find_all(&text, query, options)?;

        let ranges: Vec<Range> = matches
            .iter()
            .map(|m| Range::new(self.index_to_position(m.start), self.index_to_position(m.end)))
            .collect();

        let tracker = self.engine.rich_spans_mut();
        let added = ranges
            .into_iter()
            .filter_map(|range| tracker.add_span(range, style))
            .count();

        debug!(query, matches = added, "highlighted search matches");
        if added > 0 {
            self.notifier.publish(StateChangeType::RichSpansChanged, None);
        }
        Ok(added)
    }

    // ----- styling configuration -----

    /// Replace every inline span carrying `old` with `new`, and make `new` the default style.
    ///
    /// Spans are rewritten in place; an empty `new` removes them. The pass is not undoable and
    /// clears the history, since recorded snapshots still refer to `old`.
    pub fn retag_default_style(&mut self, old: &StyleAttributes, new: StyleAttributes) {
        let line_count = self.line_count();
        let mut changed = false;

        for line_idx in 0..line_count {
            let Some(line) = self.line(line_idx) else {
                break;
            };
            if !line.spans().iter().any(|span| span.attributes == *old) {
                continue;
            }
            let spans: Vec<StyleSpan> = line
                .spans()
                .iter()
                .filter(|span| span.attributes != *old || !new.is_empty())
                .map(|span| {
                    if span.attributes == *old {
                        StyleSpan::new(new.clone(), span.start, span.end)
                    } else {
                        span.clone()
                    }
                })
                .collect();
            self.engine.buffer_mut().set_line_spans(line_idx, spans);
            changed = true;
        }

        self.config.default_style = new;
        if changed {
            self.history.clear();
        }
        self.notifier.publish(StateChangeType::StyleChanged, None);
    }

    // ----- notification -----

    /// Register a callback invoked after every change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.notifier.subscribe(Box::new(callback))
    }

    /// Remove a callback. Returns `false` if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Number of registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rich_spans::HIGHLIGHT_STYLE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_typing_moves_cursor() {
        let mut doc = Document::empty();
        doc.insert_text("ab");
        doc.insert_char('\n');
        doc.insert_char('c');
        assert_eq!(doc.text(), "ab\nc");
        assert_eq!(doc.cursor(), Position::new(1, 1));
        assert_eq!(doc.undo_depth(), 3);
    }

    #[test]
    fn test_typed_crlf_matches_imported_crlf() {
        let mut doc = Document::new("a");
        doc.set_cursor(Position::new(0, 1));
        doc.insert_text("x\r\ny");

        assert_eq!(doc.text(), Document::new("ax\r\ny").text());
        assert_eq!(doc.line(0).map(Line::text), Some("ax"));
        assert_eq!(doc.cursor(), Position::new(1, 1));
        assert!(doc.undo());
        assert_eq!(doc.text(), "a");
    }

    #[test]
    fn test_backspace_joins_lines_at_column_zero() {
        let mut doc = Document::new("ab\ncd");
        doc.set_cursor(Position::new(1, 0));
        doc.backspace();
        assert_eq!(doc.text(), "abcd");
        assert_eq!(doc.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut doc = Document::new("ae\u{301}");
        doc.set_cursor(Position::new(0, 3));
        doc.backspace();
        assert_eq!(doc.text(), "a");
        assert_eq!(doc.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut doc = Document::new("abc");
        let version = doc.version();
        doc.backspace();
        assert_eq!(doc.text(), "abc");
        assert!(!doc.has_changed_since(version));
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_delete_forward_joins_next_line() {
        let mut doc = Document::new("ab\ncd");
        doc.set_cursor(Position::new(0, 2));
        doc.delete_forward();
        assert_eq!(doc.text(), "abcd");
        assert_eq!(doc.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_typing_over_selection_inherits_style() {
        let mut doc = Document::new("Hello World");
        doc.add_style(Range::on_line(0, 6, 11), StyleAttributes::bold());
        doc.set_selection(Range::on_line(0, 6, 11));
        doc.insert_text("Rust");

        assert_eq!(doc.text(), "Hello Rust");
        assert_eq!(
            doc.line(0).map(|line| line.spans().to_vec()),
            Some(vec![StyleSpan::new(StyleAttributes::bold(), 6, 10)])
        );
        assert_eq!(doc.selection(), None);
        assert_eq!(doc.cursor(), Position::new(0, 10));
    }

    #[test]
    fn test_invalid_selection_is_ignored() {
        let mut doc = Document::new("abc");
        doc.set_selection(Range::on_line(0, 2, 1));
        doc.set_selection(Range::point(Position::new(0, 1)));
        assert_eq!(doc.selection(), None);
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn test_move_left_and_right_wrap_lines() {
        let mut doc = Document::new("a\nb");
        doc.set_cursor(Position::new(1, 0));
        doc.move_left();
        assert_eq!(doc.cursor(), Position::new(0, 1));
        doc.move_right();
        assert_eq!(doc.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_move_collapses_selection() {
        let mut doc = Document::new("abcdef");
        doc.set_selection(Range::on_line(0, 1, 4));
        doc.move_left();
        assert_eq!(doc.cursor(), Position::new(0, 1));
        assert_eq!(doc.selection(), None);
    }

    #[test]
    fn test_effective_style_merges_default() {
        let config = DocumentConfig::default()
            .with_default_style(StyleAttributes::color("black"));
        let mut doc = Document::with_config("abc", config);
        doc.add_style(Range::on_line(0, 0, 2), StyleAttributes::bold());

        let style = doc.effective_style_at(Position::new(0, 1));
        assert_eq!(style.get(crate::style::FONT_WEIGHT), Some("bold"));
        assert_eq!(style.get(crate::style::COLOR), Some("black"));
        assert_eq!(
            doc.effective_style_at(Position::new(0, 2)),
            StyleAttributes::color("black")
        );
    }

    #[test]
    fn test_styles_in_range_reports_lines() {
        let mut doc = Document::new("abc\ndef");
        doc.add_style(Range::on_line(0, 0, 1), StyleAttributes::bold());
        doc.add_style(Range::on_line(1, 1, 3), StyleAttributes::italic());

        let found = doc.styles_in_range(Range::new(Position::new(0, 1), Position::new(1, 2)));
        assert_eq!(
            found,
            vec![(1, StyleSpan::new(StyleAttributes::italic(), 1, 3))]
        );
    }

    #[test]
    fn test_highlight_matches_and_clear() {
        let mut doc = Document::new("foo bar\nfoo");
        let count = doc
            .highlight_matches("foo", SearchOptions::default(), HIGHLIGHT_STYLE)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(doc.rich_spans_intersecting(1, None).len(), 1);
        assert_eq!(doc.clear_rich_spans(HIGHLIGHT_STYLE), 2);
        assert!(doc.rich_spans().is_empty());
    }

    #[test]
    fn test_word_ranges() {
        let doc = Document::new("one two\n  three");
        assert_eq!(
            doc.word_ranges(),
            vec![
                Range::on_line(0, 0, 3),
                Range::on_line(0, 4, 7),
                Range::on_line(1, 2, 7),
            ]
        );
    }

    #[test]
    fn test_retag_default_style() {
        let old = StyleAttributes::color("black");
        let new = StyleAttributes::color("white");
        let mut doc = Document::new("abc");
        doc.add_style(Range::on_line(0, 0, 3), old.clone());

        doc.retag_default_style(&old, new.clone());
        assert_eq!(doc.styles_at(Position::new(0, 0))[0].attributes, new);
        assert_eq!(doc.config().default_style, new);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_find_next_from_cursor() {
        let mut doc = Document::new("ab\nab");
        doc.set_cursor(Position::new(0, 1));
        assert_eq!(
            doc.find_next("ab", SearchOptions::default()).unwrap(),
            Some(Range::on_line(1, 0, 2))
        );
    }
}
