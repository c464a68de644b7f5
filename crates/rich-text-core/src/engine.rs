//! Edit engine.
//!
//! Applies [`Operation`]s to the line buffer. Per-line span arithmetic is delegated to the
//! [`normalizer`](crate::normalizer); cross-line annotation arithmetic to the
//! [`RichSpanTracker`]. When asked to record, the engine captures the [`OperationMetadata`]
//! needed to reverse the edit before touching anything.

use crate::buffer::{Line, LineBuffer};
use crate::normalizer::{self, SpanEdit};
use crate::operation::{LineSpansSnapshot, Operation, OperationMetadata, PreservedRichSpan};
use crate::position::Range;
use crate::rich_spans::RichSpanTracker;
use crate::style::{StyleAttributes, StyleSpan};
use crate::text::{self, StyledText};
use tracing::{debug, trace};

/// Owns the line buffer and rich spans, and applies operations to them.
#[derive(Debug, Clone, Default)]
pub struct EditEngine {
    buffer: LineBuffer,
    rich_spans: RichSpanTracker,
}

impl EditEngine {
    /// Wrap an existing buffer with no rich spans.
    pub fn new(buffer: LineBuffer) -> Self {
        Self {
            buffer,
            rich_spans: RichSpanTracker::new(),
        }
    }

    /// The line buffer.
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// The rich span tracker.
    pub fn rich_spans(&self) -> &RichSpanTracker {
        &self.rich_spans
    }

    /// Mutable access to the rich span tracker.
    pub fn rich_spans_mut(&mut self) -> &mut RichSpanTracker {
        &mut self.rich_spans
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    /// Clamp every position in `operation` into the current document.
    pub fn clamp_operation(&self, operation: Operation) -> Operation {
        let before = self.buffer.clamp_position(operation.cursor_before());
        match operation {
            Operation::Insert { position, text, .. } => {
                let position = self.buffer.clamp_position(position);
                let text = text.normalize_line_endings();
                let after = text.end_position(position);
                Operation::insert(position, text).with_cursors(before, after)
            }
            Operation::Delete { range, .. } => {
                let range = self.buffer.clamp_range(range);
                Operation::delete(range).with_cursors(before, range.start)
            }
            Operation::Replace {
                range,
                new_text,
                inherit_style,
                ..
            } => {
                let range = self.buffer.clamp_range(range);
                let old_text = self.buffer.styled_text(range);
                let new_text = new_text.normalize_line_endings();
                let op = Operation::replace(range, old_text, new_text, inherit_style);
                let after = op.cursor_after();
                op.with_cursors(before, after)
            }
            Operation::StyleSpan {
                range,
                attributes,
                is_add,
                cursor_after,
                ..
            } => {
                let range = self.buffer.clamp_range(range);
                let after = self.buffer.clamp_position(cursor_after);
                Operation::style(range, attributes, is_add).with_cursors(before, after)
            }
        }
    }

    /// Apply `operation`, clamped to the document first.
    ///
    /// When `record_history` is set, the returned metadata holds everything needed to build
    /// and replay the inverse of the clamped operation, so callers keeping their own history
    /// should record the result of [`clamp_operation`](Self::clamp_operation). The ids of rich
    /// spans created by splits are always reported.
    pub fn apply(&mut self, operation: &Operation, record_history: bool) -> OperationMetadata {
        let clamped = self.clamp_operation(operation.clone());
        let operation = &clamped;

        let mut metadata = if record_history {
            self.capture(operation)
        } else {
            OperationMetadata::default()
        };

        debug!(
            kind = operation.kind(),
            line = operation.anchor().line,
            column = operation.anchor().column,
            record = record_history,
            "apply operation"
        );

        match operation {
            Operation::Insert { position, text, .. } => {
                self.splice(Range::point(*position), text, false);
            }
            Operation::Delete { range, .. } => {
                self.splice(*range, &StyledText::default(), false);
            }
            Operation::Replace {
                range,
                new_text,
                inherit_style,
                ..
            } => {
                self.splice(*range, new_text, *inherit_style);
            }
            Operation::StyleSpan {
                range,
                attributes,
                is_add,
                ..
            } => {
                self.restyle(*range, attributes, *is_add);
            }
        }

        metadata.created_rich_spans = self.rich_spans.transform(operation);
        metadata
    }

    /// Put back the inline spans captured in `snapshot`.
    pub(crate) fn restore_line_spans(&mut self, snapshot: &LineSpansSnapshot) {
        for (offset, spans) in snapshot.spans.iter().enumerate() {
            self.buffer
                .set_line_spans(snapshot.first_line + offset, spans.clone());
        }
    }

    fn capture(&self, operation: &Operation) -> OperationMetadata {
        let lines = operation.lines_before();
        let first_line = *lines.start();
        let line_spans = lines
            .filter_map(|idx| self.buffer.line(idx))
            .map(|line| line.spans().to_vec())
            .collect();

        let (deleted_text, touched) = match operation {
            Operation::Insert { position, .. } => {
                (None, self.rich_spans.spans_touching(Range::point(*position)))
            }
            Operation::Delete { range, .. } | Operation::Replace { range, .. } => (
                Some(self.buffer.styled_text(*range)),
                self.rich_spans.spans_touching(*range),
            ),
            Operation::StyleSpan { .. } => (None, Vec::new()),
        };

        let anchor = operation.anchor();
        OperationMetadata {
            deleted_text,
            preserved_rich_spans: touched
                .iter()
                .map(|(id, span)| PreservedRichSpan::capture(*id, span, anchor))
                .collect(),
            line_spans_before: Some(LineSpansSnapshot {
                first_line,
                spans: line_spans,
            }),
            created_rich_spans: Vec::new(),
        }
    }

    /// Replace `range` with `text`.
    fn splice(&mut self, range: Range, text: &StyledText, inherit_style: bool) {
        let inherited = if inherit_style {
            self.inherited_attributes(range)
        } else {
            Vec::new()
        };

        if range.is_single_line() && !text.contains_newline() {
            self.splice_within_line(range, text, inherited);
        } else {
            self.splice_lines(range, text, inherited);
        }
    }

    fn splice_within_line(
        &mut self,
        range: Range,
        text: &StyledText,
        inherited: Vec<StyleAttributes>,
    ) {
        let Some(line) = self.buffer.line(range.start.line) else {
            return;
        };

        let (start, end) = (range.start.column, range.end.column);
        let inserted_len = text.char_len();

        let mut inserted_spans = text.spans.clone();
        if inserted_len > 0 {
            inserted_spans.extend(
                inherited
                    .into_iter()
                    .map(|attributes| StyleSpan::new(attributes, 0, inserted_len)),
            );
        }

        let edit = if start == end {
            SpanEdit::insert(start, inserted_len, inserted_spans)
        } else if inserted_len == 0 {
            SpanEdit::delete(start, end)
        } else {
            SpanEdit::splice(start, end, inserted_len, inserted_spans)
        };
        let spans = normalizer::normalize(line.spans(), line.len(), &edit);

        let mut new_text = String::with_capacity(line.text().len() + text.text.len());
        new_text.push_str(text::slice_columns(line.text(), 0, start));
        new_text.push_str(&text.text);
        new_text.push_str(text::slice_columns(line.text(), end, line.len()));

        trace!(
            line = range.start.line,
            start,
            end,
            inserted_len,
            "single-line splice"
        );
        self.buffer
            .replace_line(range.start.line, Line::new(new_text, spans));
    }

    fn splice_lines(&mut self, range: Range, text: &StyledText, inherited: Vec<StyleAttributes>) {
        let (Some(first), Some(last)) = (
            self.buffer.line(range.start.line),
            self.buffer.line(range.end.line),
        ) else {
            return;
        };

        let prefix = first.slice(0, range.start.column);
        let suffix = last.slice(range.end.column, last.len());

        // Styles that run through the edit point keep covering the inserted text.
        let mut carried = inherited;
        if range.is_single_line() {
            let (start, end) = (range.start.column, range.end.column);
            carried.extend(
                first
                    .spans()
                    .iter()
                    .filter(|span| span.start < start && span.end > end)
                    .map(|span| span.attributes.clone()),
            );
        }

        let segments = text.segments();
        let last_segment = segments.len() - 1;
        let mut new_lines = Vec::with_capacity(segments.len());

        for (idx, segment) in segments.into_iter().enumerate() {
            let (mut line_text, mut spans, offset) = if idx == 0 {
                let offset = prefix.char_len();
                (prefix.text.clone(), prefix.spans.clone(), offset)
            } else {
                (String::new(), Vec::new(), 0)
            };

            let segment_len = segment.char_len();
            line_text.push_str(&segment.text);
            spans.extend(segment.spans.iter().map(|span| span.shifted(offset)));
            if segment_len > 0 {
                spans.extend(carried.iter().map(|attributes| {
                    StyleSpan::new(attributes.clone(), offset, offset + segment_len)
                }));
            }

            if idx == last_segment {
                let suffix_start = offset + segment_len;
                line_text.push_str(&suffix.text);
                spans.extend(suffix.spans.iter().map(|span| span.shifted(suffix_start)));
            }

            new_lines.push(Line::new(line_text, spans));
        }

        let first_line = range.start.line;
        let removed = range.end.line - range.start.line;
        trace!(
            first_line,
            removed,
            inserted = new_lines.len(),
            "multi-line splice"
        );

        let mut new_lines = new_lines.into_iter();
        if let Some(line) = new_lines.next() {
            self.buffer.replace_line(first_line, line);
        }
        self.buffer.remove_lines(first_line + 1, removed);
        self.buffer.insert_lines(first_line + 1, new_lines.collect());
    }

    fn restyle(&mut self, range: Range, attributes: &StyleAttributes, is_add: bool) {
        for line_idx in range.start.line..=range.end.line {
            let Some(line) = self.buffer.line(line_idx) else {
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

            let spans = if is_add {
                normalizer::apply_style(line.spans(), start, end, attributes)
            } else {
                normalizer::remove_style(line.spans(), start, end, attributes)
            };
            self.buffer.set_line_spans(line_idx, spans);
        }
    }

    /// Attributes a replacement inherits: spans covering the first replaced character, or
    /// failing that, spans ending right at the start of the range.
    fn inherited_attributes(&self, range: Range) -> Vec<StyleAttributes> {
        let Some(line) = self.buffer.line(range.start.line) else {
            return Vec::new();
        };
        let column = range.start.column;

        let covering = normalizer::attributes_covering(line.spans(), column, column + 1);
        if !covering.is_empty() {
            return covering;
        }

        line.spans()
            .iter()
            .filter(|span| span.end == column)
            .map(|span| span.attributes.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::rich_spans::HIGHLIGHT_STYLE;
    use pretty_assertions::assert_eq;

    fn bold(start: usize, end: usize) -> StyleSpan {
        StyleSpan::new(StyleAttributes::bold(), start, end)
    }

    fn italic(start: usize, end: usize) -> StyleSpan {
        StyleSpan::new(StyleAttributes::italic(), start, end)
    }

    fn engine_with(text: &str, spans: &[(usize, Vec<StyleSpan>)]) -> EditEngine {
        let mut buffer = LineBuffer::from_text(text);
        for (line, line_spans) in spans {
            buffer.set_line_spans(*line, line_spans.clone());
        }
        EditEngine::new(buffer)
    }

    fn spans_of(engine: &EditEngine, line: usize) -> Vec<StyleSpan> {
        engine
            .buffer()
            .line(line)
            .map(|line| line.spans().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn test_insert_plain_text_inside_bold_expands_it() {
        let mut engine = engine_with("Hello", &[(0, vec![bold(0, 5)])]);
        engine.apply(&Operation::insert(Position::new(0, 2), "xx"), false);
        assert_eq!(engine.buffer().text(), "Hexxllo");
        assert_eq!(spans_of(&engine, 0), vec![bold(0, 7)]);
    }

    #[test]
    fn test_insert_at_end_of_bold_stays_plain() {
        let mut engine = engine_with("Hello", &[(0, vec![bold(0, 5)])]);
        engine.apply(&Operation::insert(Position::new(0, 5), "!"), false);
        assert_eq!(spans_of(&engine, 0), vec![bold(0, 5)]);
    }

    #[test]
    fn test_newline_splits_bold_line() {
        let mut engine = engine_with("Hello World", &[(0, vec![bold(0, 11)])]);
        engine.apply(&Operation::insert(Position::new(0, 5), "\n"), false);
        assert_eq!(engine.buffer().text(), "Hello\n World");
        assert_eq!(spans_of(&engine, 0), vec![bold(0, 5)]);
        assert_eq!(spans_of(&engine, 1), vec![bold(0, 6)]);
    }

    #[test]
    fn test_multi_line_insert_carries_own_spans() {
        let mut engine = engine_with("ad", &[]);
        let text = StyledText::new("b\nc", vec![italic(0, 3)]);
        engine.apply(&Operation::insert(Position::new(0, 1), text), false);
        assert_eq!(engine.buffer().text(), "ab\ncd");
        assert_eq!(spans_of(&engine, 0), vec![italic(1, 2)]);
        assert_eq!(spans_of(&engine, 1), vec![italic(0, 1)]);
    }

    #[test]
    fn test_multi_line_delete_joins_spans() {
        let mut engine = engine_with(
            "one\ntwo\nthree",
            &[(0, vec![bold(0, 3)]), (2, vec![bold(0, 2), italic(3, 5)])],
        );
        engine.apply(
            &Operation::delete(Range::new(Position::new(0, 2), Position::new(2, 3))),
            false,
        );
        assert_eq!(engine.buffer().text(), "onee");
        assert_eq!(spans_of(&engine, 0), vec![bold(0, 2), italic(2, 4)]);
    }

    #[test]
    fn test_delete_everything_leaves_one_empty_line() {
        let mut engine = engine_with("a\nb\nc", &[]);
        let end = engine.buffer().end_position();
        engine.apply(
            &Operation::delete(Range::new(Position::new(0, 0), end)),
            false,
        );
        assert_eq!(engine.buffer().line_count(), 1);
        assert_eq!(engine.buffer().text(), "");
    }

    #[test]
    fn test_replace_with_inherited_style() {
        let mut engine = engine_with("Hello World", &[(0, vec![bold(6, 11)])]);
        let op = Operation::replace(
            Range::on_line(0, 6, 11),
            StyledText::plain("World"),
            "There",
            true,
        );
        engine.apply(&op, false);
        assert_eq!(engine.buffer().text(), "Hello There");
        assert_eq!(spans_of(&engine, 0), vec![bold(6, 11)]);
    }

    #[test]
    fn test_replace_without_inheritance_drops_style() {
        let mut engine = engine_with("Hello World", &[(0, vec![bold(6, 11)])]);
        let op = Operation::replace(
            Range::on_line(0, 6, 11),
            StyledText::plain("World"),
            "There",
            false,
        );
        engine.apply(&op, false);
        assert_eq!(spans_of(&engine, 0), Vec::new());
    }

    #[test]
    fn test_multi_line_style_uses_column_bounds_on_edges() {
        let mut engine = engine_with("abcd\nefgh\nijkl", &[]);
        let range = Range::new(Position::new(0, 2), Position::new(2, 1));
        engine.apply(&Operation::style(range, StyleAttributes::bold(), true), false);
        assert_eq!(spans_of(&engine, 0), vec![bold(2, 4)]);
        assert_eq!(spans_of(&engine, 1), vec![bold(0, 4)]);
        assert_eq!(spans_of(&engine, 2), vec![bold(0, 1)]);
    }

    #[test]
    fn test_capture_records_deleted_text_and_spans() {
        let mut engine = engine_with("Hello World", &[(0, vec![bold(0, 5)])]);
        engine
            .rich_spans_mut()
            .add_span(Range::on_line(0, 4, 8), HIGHLIGHT_STYLE);

        let metadata = engine.apply(&Operation::delete(Range::on_line(0, 3, 6)), true);
        assert_eq!(
            metadata.deleted_text,
            Some(StyledText::new("lo ", vec![bold(0, 2)]))
        );
        assert_eq!(metadata.preserved_rich_spans.len(), 1);
        assert_eq!(
            metadata.line_spans_before,
            Some(LineSpansSnapshot {
                first_line: 0,
                spans: vec![vec![bold(0, 5)]],
            })
        );
    }

    #[test]
    fn test_unrecorded_apply_reports_only_splits() {
        let mut engine = engine_with("abcdef", &[]);
        engine
            .rich_spans_mut()
            .add_span(Range::on_line(0, 1, 5), HIGHLIGHT_STYLE);

        let metadata = engine.apply(&Operation::insert(Position::new(0, 3), "\n"), false);
        assert!(metadata.deleted_text.is_none());
        assert!(metadata.line_spans_before.is_none());
        assert_eq!(metadata.created_rich_spans.len(), 1);
    }

    #[test]
    fn test_apply_clamps_delete_past_line_end() {
        let mut engine = engine_with("abc", &[(0, vec![bold(0, 1)])]);
        engine.apply(
            &Operation::delete(Range::new(Position::new(0, 1), Position::new(0, 99))),
            false,
        );
        assert_eq!(engine.buffer().text(), "a");
        assert_eq!(spans_of(&engine, 0), vec![bold(0, 1)]);
    }

    #[test]
    fn test_apply_clamps_range_ending_on_missing_line() {
        let mut engine = engine_with("abc", &[]);
        let id = engine
            .rich_spans_mut()
            .add_span(Range::on_line(0, 0, 2), HIGHLIGHT_STYLE)
            .unwrap();

        let metadata = engine.apply(
            &Operation::delete(Range::new(Position::new(0, 2), Position::new(5, 0))),
            true,
        );
        assert_eq!(engine.buffer().text(), "ab");
        assert_eq!(
            engine.rich_spans().get(id).map(|span| span.range),
            Some(Range::on_line(0, 0, 2))
        );
        assert_eq!(metadata.deleted_text, Some(StyledText::plain("c")));
    }

    #[test]
    fn test_clamp_operation_pulls_positions_in() {
        let engine = engine_with("abc\nde", &[]);
        let op = engine.clamp_operation(Operation::delete(Range::new(
            Position::new(0, 1),
            Position::new(9, 9),
        )));
        assert_eq!(
            op,
            Operation::delete(Range::new(Position::new(0, 1), Position::new(1, 2)))
        );
    }
}
