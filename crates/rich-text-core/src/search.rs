//! Text search helpers.
//!
//! Searches run over the document's plain text (lines joined with `'\n'`) and report
//! **character offsets**, which the document maps back to positions with
//! [`LineBuffer::index_to_position`](crate::LineBuffer::index_to_position). Supported modes:
//!
//! - plain substring search (escaped and compiled into a regex)
//! - regex search
//! - optional whole-word matching
//! - optional case-insensitive matching

use crate::text;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words (alphanumeric and `_`).
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            regex: false,
        }
    }
}

/// A match expressed as a half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl SearchMatch {
    /// Length of the match in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Search errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    #[error("invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// A compiled query, ready to scan text.
struct Matcher {
    regex: Regex,
    whole_word: bool,
}

impl Matcher {
    /// Compile `query`; an empty query matches nothing and yields `None`.
    fn compile(query: &str, options: SearchOptions) -> Result<Option<Self>, SearchError> {
        if query.is_empty() {
            return Ok(None);
        }

        let pattern = if options.regex {
            query.to_string()
        } else {
            regex::escape(query)
        };
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!options.case_sensitive)
            .multi_line(true)
            .build()?;

        Ok(Some(Self {
            regex,
            whole_word: options.whole_word,
        }))
    }

    /// Non-overlapping, non-empty matches starting at or after `from_byte`, as byte ranges.
    fn byte_matches<'a>(
        &'a self,
        text: &'a str,
        from_byte: usize,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        let mut next = Some(from_byte);
        std::iter::from_fn(move || {
            while let Some(at) = next {
                let found = self.regex.find_at(text, at)?;
                let (start, end) = (found.start(), found.end());

                if start == end {
                    // Step over one character so an empty match cannot repeat.
                    next = text[end..].chars().next().map(|ch| end + ch.len_utf8());
                    continue;
                }
                next = Some(end);
                if !self.whole_word || is_whole_word(text, start, end) {
                    return Some((start, end));
                }
            }
            None
        })
    }
}

/// Converts ascending byte offsets to character offsets in one forward pass.
struct CharCounter<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCounter<'a> {
    fn at(text: &'a str, byte: usize, chars: usize) -> Self {
        Self { text, byte, chars }
    }

    fn advance_to(&mut self, byte: usize) -> usize {
        self.chars += text::char_len(&self.text[self.byte..byte]);
        self.byte = byte;
        self.chars
    }

    fn match_at(&mut self, (start, end): (usize, usize)) -> SearchMatch {
        SearchMatch {
            start: self.advance_to(start),
            end: self.advance_to(end),
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Find the next occurrence of `query` in `text`, searching forward from `from_char`.
///
/// Returns `Ok(None)` if no match is found or `query` is empty.
pub fn find_next(
    text: &str,
    query: &str,
    options: SearchOptions,
    from_char: usize,
) -> Result<Option<SearchMatch>, SearchError> {
    let Some(matcher) = Matcher::compile(query, options)? else {
        return Ok(None);
    };

    let from_char = from_char.min(text::char_len(text));
    let from_byte = text::byte_offset(text, from_char);
    let mut counter = CharCounter::at(text, from_byte, from_char);

    Ok(matcher
        .byte_matches(text, from_byte)
        .next()
        .map(|found| counter.match_at(found)))
}

/// Find all non-empty, non-overlapping occurrences of `query` in `text`.
///
/// Returns an empty list if `query` is empty.
pub fn find_all(
    text: &str,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchMatch>, SearchError> {
    let Some(matcher) = Matcher::compile(query, options)? else {
        return Ok(Vec::new());
    };

    let mut counter = CharCounter::at(text, 0, 0);
    Ok(matcher
        .byte_matches(text, 0)
        .map(|found| counter.match_at(found))
        .collect())
}
