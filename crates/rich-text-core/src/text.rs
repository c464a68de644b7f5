//! Styled text fragments and character-offset helpers.
//!
//! All offsets are counted in Unicode scalar values (`char`), never bytes.

use crate::normalizer;
use crate::position::Position;
use crate::style::{StyleAttributes, StyleSpan};
use unicode_segmentation::UnicodeSegmentation;

/// A run of text with inline style spans, possibly containing `'\n'`.
///
/// Span offsets are flat character offsets into `text`; a newline counts as one character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
    /// The raw text.
    pub text: String,
    /// Style spans over `text`, sorted by start.
    pub spans: Vec<StyleSpan>,
}

impl StyledText {
    /// Build styled text, clipping spans to the text and dropping empty ones.
    pub fn new(text: impl Into<String>, spans: Vec<StyleSpan>) -> Self {
        let text = text.into();
        let len = char_len(&text);
        let spans = normalizer::merge_and_clip(spans, len);
        Self { text, spans }
    }

    /// Text without any spans.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Text entirely covered by one attribute set.
    pub fn styled(text: impl Into<String>, attributes: StyleAttributes) -> Self {
        let text = text.into();
        let len = char_len(&text);
        let spans = if len == 0 {
            Vec::new()
        } else {
            vec![StyleSpan::new(attributes, 0, len)]
        };
        Self { text, spans }
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the text spans more than one line.
    pub fn contains_newline(&self) -> bool {
        self.text.contains('\n')
    }

    /// Position right after this text, were it inserted at `start`.
    pub fn end_position(&self, start: Position) -> Position {
        match self.text.rfind('\n') {
            None => Position::new(start.line, start.column + self.char_len()),
            Some(last_newline) => {
                let newlines = self.text.matches('\n').count();
                let tail = &self.text[last_newline + 1..];
                Position::new(start.line + newlines, char_len(tail))
            }
        }
    }

    /// Split at every `'\n'` into single-line fragments with line-local spans.
    ///
    /// Always returns at least one fragment; `N` newlines produce `N + 1` fragments.
    pub fn segments(&self) -> Vec<StyledText> {
        let mut out = Vec::new();
        let mut offset = 0usize;

        for piece in self.text.split('\n') {
            let len = char_len(piece);
            let end = offset + len;
            let spans = self
                .spans
                .iter()
                .filter(|span| span.overlaps(offset, end))
                .map(|span| {
                    StyleSpan::new(
                        span.attributes.clone(),
                        span.start.max(offset) - offset,
                        span.end.min(end) - offset,
                    )
                })
                .collect();
            out.push(StyledText {
                text: piece.to_string(),
                spans,
            });
            // Skip the newline separator.
            offset = end + 1;
        }

        out
    }

    /// Treat every `"\r\n"` as `'\n'`, dropping the carriage returns and any span coverage
    /// they had. A lone `'\r'` is kept.
    pub fn normalize_line_endings(self) -> Self {
        if !self.text.contains("\r\n") {
            return self;
        }

        let mut lines = self.segments();
        let last = lines.len() - 1;
        for line in &mut lines[..last] {
            if line.text.ends_with('\r') {
                line.text.pop();
                let len = line.char_len();
                line.spans = normalizer::merge_and_clip(std::mem::take(&mut line.spans), len);
            }
        }
        Self::join_lines(lines)
    }

    /// Join single-line fragments with `'\n'`, the inverse of [`segments`](Self::segments).
    pub fn join_lines(lines: Vec<StyledText>) -> StyledText {
        let mut text = String::new();
        let mut spans = Vec::new();
        let mut offset = 0usize;

        for (idx, line) in lines.into_iter().enumerate() {
            if idx > 0 {
                text.push('\n');
                offset += 1;
            }
            let len = line.char_len();
            spans.extend(line.spans.iter().map(|span| span.shifted(offset)));
            text.push_str(&line.text);
            offset += len;
        }

        spans.sort_by_key(|span| (span.start, span.end));
        StyledText { text, spans }
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of character `column`, clamped to the end of `text`.
pub(crate) fn byte_offset(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

pub(crate) fn slice_columns(text: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end).max(start_byte);
    &text[start_byte..end_byte]
}

/// Column where the grapheme cluster ending at (or containing) `column - 1` starts.
pub(crate) fn prev_grapheme_column(text: &str, column: usize) -> usize {
    let column = column.min(char_len(text));
    if column == 0 {
        return 0;
    }

    let mut start = 0usize;
    for grapheme in text.graphemes(true) {
        let end = start + char_len(grapheme);
        if end >= column {
            return start;
        }
        start = end;
    }
    start
}

/// Column right after the grapheme cluster starting at (or containing) `column`.
pub(crate) fn next_grapheme_column(text: &str, column: usize) -> usize {
    let mut start = 0usize;
    for grapheme in text.graphemes(true) {
        let end = start + char_len(grapheme);
        if end > column {
            return end;
        }
        start = end;
    }
    start
}

/// Column ranges of every word on a line (Unicode word boundaries).
pub(crate) fn word_columns(text: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut column = 0usize;

    for segment in text.split_word_bounds() {
        let len = char_len(segment);
        if segment.chars().any(char::is_alphanumeric) {
            out.push((column, column + len));
        }
        column += len;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_end_position() {
        let start = Position::new(2, 4);
        assert_eq!(
            StyledText::plain("abc").end_position(start),
            Position::new(2, 7)
        );
        assert_eq!(
            StyledText::plain("\n").end_position(start),
            Position::new(3, 0)
        );
        assert_eq!(
            StyledText::plain("ab\ncd\nxyz").end_position(start),
            Position::new(4, 3)
        );
    }

    #[test]
    fn test_segments_localize_spans() {
        let text = StyledText::new(
            "ab\ncd",
            vec![StyleSpan::new(StyleAttributes::bold(), 1, 4)],
        );
        let segments = text.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "ab");
        assert_eq!(
            segments[0].spans,
            vec![StyleSpan::new(StyleAttributes::bold(), 1, 2)]
        );
        assert_eq!(segments[1].text, "cd");
        assert_eq!(
            segments[1].spans,
            vec![StyleSpan::new(StyleAttributes::bold(), 0, 1)]
        );
    }

    #[test]
    fn test_join_lines_inverts_segments() {
        let text = StyledText::new(
            "one\ntwo\nthree",
            vec![
                StyleSpan::new(StyleAttributes::bold(), 0, 3),
                StyleSpan::new(StyleAttributes::italic(), 8, 11),
            ],
        );
        assert_eq!(StyledText::join_lines(text.segments()), text);
    }

    #[test]
    fn test_normalize_line_endings_drops_carriage_returns() {
        let text = StyledText::new(
            "ab\r\ncd\r",
            vec![StyleSpan::new(StyleAttributes::bold(), 1, 5)],
        );
        let normalized = text.normalize_line_endings();
        assert_eq!(normalized.text, "ab\ncd\r");
        assert_eq!(
            normalized.spans,
            vec![
                StyleSpan::new(StyleAttributes::bold(), 1, 2),
                StyleSpan::new(StyleAttributes::bold(), 3, 4),
            ]
        );
        assert_eq!(
            StyledText::plain("a\rb").normalize_line_endings(),
            StyledText::plain("a\rb")
        );
    }

    #[test]
    fn test_grapheme_columns() {
        // "e" + combining acute accent forms one cluster.
        let text = "ae\u{301}b";
        assert_eq!(prev_grapheme_column(text, 3), 1);
        assert_eq!(prev_grapheme_column(text, 4), 3);
        assert_eq!(next_grapheme_column(text, 1), 3);
        assert_eq!(next_grapheme_column(text, 3), 4);
        assert_eq!(next_grapheme_column(text, 4), 4);
    }

    #[test]
    fn test_word_columns() {
        assert_eq!(
            word_columns("Hello, wörld 42!"),
            vec![(0, 5), (7, 12), (13, 15)]
        );
    }

    #[test]
    fn test_slice_columns_multibyte() {
        assert_eq!(slice_columns("aé中b", 1, 3), "é中");
        assert_eq!(slice_columns("abc", 2, 10), "c");
    }
}
