//! Line buffer: the owned sequence of styled lines.
//!
//! The buffer always holds at least one line. Mutation goes through a small set of
//! crate-private primitives (replace a line, insert lines, remove lines, set spans) used by the
//! edit engine and the history log.

use crate::normalizer;
use crate::position::{Position, Range};
use crate::style::StyleSpan;
use crate::text::{self, StyledText};

/// A single logical line: text without its newline, plus its inline style spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    text: String,
    spans: Vec<StyleSpan>,
    len: usize,
}

impl Line {
    /// Build a line, normalizing `spans` against the text length.
    pub fn new(text: impl Into<String>, spans: Vec<StyleSpan>) -> Self {
        let text = text.into();
        let len = text::char_len(&text);
        let spans = normalizer::merge_and_clip(spans, len);
        Self { text, spans, len }
    }

    /// An empty line.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Line text (no trailing newline).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Style spans, sorted by start.
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the line has no characters.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Columns `[start, end)` as styled text with spans re-based to the slice.
    pub fn slice(&self, start: usize, end: usize) -> StyledText {
        let end = end.min(self.len);
        let start = start.min(end);
        StyledText {
            text: text::slice_columns(&self.text, start, end).to_string(),
            spans: normalizer::slice(&self.spans, start, end),
        }
    }

    pub(crate) fn set_spans(&mut self, spans: Vec<StyleSpan>) {
        self.spans = normalizer::merge_and_clip(spans, self.len);
    }
}

/// Ordered, never-empty sequence of [`Line`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Line>,
}

impl LineBuffer {
    /// A buffer holding one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::empty()],
        }
    }

    /// Build a buffer from plain text; `"\r\n"` is treated as `'\n'`.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| Line::new(line.strip_suffix('\r').unwrap_or(line), Vec::new()))
            .collect();
        Self { lines }
    }

    /// Build a buffer from styled text; `"\r\n"` is treated as `'\n'`.
    pub fn from_styled(text: &StyledText) -> Self {
        let lines = text
            .clone()
            .normalize_line_endings()
            .segments()
            .into_iter()
            .map(|segment| Line::new(segment.text, segment.spans))
            .collect();
        Self { lines }
    }

    /// Number of lines (always at least one).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line at `index`.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// All lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Length of line `index` in characters (0 when out of range).
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map(Line::len).unwrap_or(0)
    }

    /// Total characters, counting one newline per line boundary.
    pub fn char_count(&self) -> usize {
        let chars: usize = self.lines.iter().map(Line::len).sum();
        chars + self.lines.len().saturating_sub(1)
    }

    /// Full text joined with `'\n'`; style spans are dropped.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.char_count());
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(line.text());
        }
        out
    }

    /// Position after the last character of the document.
    pub fn end_position(&self) -> Position {
        let last = self.lines.len() - 1;
        Position::new(last, self.line_len(last))
    }

    /// Clamp a position into the document: line to the last line, column to the line length.
    pub fn clamp_position(&self, position: Position) -> Position {
        let line = position.line.min(self.lines.len() - 1);
        Position::new(line, position.column.min(self.line_len(line)))
    }

    /// Clamp both endpoints and order them.
    pub fn clamp_range(&self, range: Range) -> Range {
        Range::ordered(
            self.clamp_position(range.start),
            self.clamp_position(range.end),
        )
    }

    /// Styled text covered by `range` (clamped), lines joined with `'\n'`.
    pub fn styled_text(&self, range: Range) -> StyledText {
        let range = self.clamp_range(range);
        if range.is_single_line() {
            return self.lines[range.start.line].slice(range.start.column, range.end.column);
        }

        let mut pieces = Vec::with_capacity(range.end.line - range.start.line + 1);
        for line_idx in range.start.line..=range.end.line {
            let line = &self.lines[line_idx];
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
            pieces.push(line.slice(start, end));
        }
        StyledText::join_lines(pieces)
    }

    pub(crate) fn replace_line(&mut self, index: usize, line: Line) {
        if let Some(slot) = self.lines.get_mut(index) {
            *slot = line;
        }
    }

    pub(crate) fn set_line_spans(&mut self, index: usize, spans: Vec<StyleSpan>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.set_spans(spans);
        }
    }

    pub(crate) fn insert_lines(&mut self, index: usize, lines: Vec<Line>) {
        let index = index.min(self.lines.len());
        self.lines.splice(index..index, lines);
    }

    pub(crate) fn remove_lines(&mut self, index: usize, count: usize) {
        let end = index.saturating_add(count).min(self.lines.len());
        if index < end {
            self.lines.drain(index..end);
        }
        if self.lines.is_empty() {
            self.lines.push(Line::empty());
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
