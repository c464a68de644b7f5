//! Inline character styling.
//!
//! [`StyleAttributes`] is an opaque key-value set; the engine never interprets individual keys,
//! it only compares whole sets for identity and merges them field by field. A [`StyleSpan`]
//! applies one attribute set to a half-open column range of a single line.

use std::collections::BTreeMap;

/// Attribute key used by [`StyleAttributes::bold`].
pub const FONT_WEIGHT: &str = "font-weight";
/// Attribute key used by [`StyleAttributes::italic`].
pub const FONT_STYLE: &str = "font-style";
/// Attribute key used by [`StyleAttributes::underline`] and [`StyleAttributes::strikethrough`].
pub const TEXT_DECORATION: &str = "text-decoration";
/// Attribute key used by [`StyleAttributes::color`].
pub const COLOR: &str = "color";

/// An opaque set of style attributes.
///
/// Two sets are considered identical when every key maps to the same value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StyleAttributes {
    values: BTreeMap<String, String>,
}

impl StyleAttributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this set with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Bold text.
    pub fn bold() -> Self {
        Self::new().with(FONT_WEIGHT, "bold")
    }

    /// Italic text.
    pub fn italic() -> Self {
        Self::new().with(FONT_STYLE, "italic")
    }

    /// Underlined text.
    pub fn underline() -> Self {
        Self::new().with(TEXT_DECORATION, "underline")
    }

    /// Struck-through text.
    pub fn strikethrough() -> Self {
        Self::new().with(TEXT_DECORATION, "line-through")
    }

    /// Foreground color (host-defined value, e.g. `#ff0000`).
    pub fn color(value: impl Into<String>) -> Self {
        Self::new().with(COLOR, value)
    }

    /// Look up a single attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether the set has no attributes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of attributes in the set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into a copy of `self`.
    ///
    /// Field by field: a non-empty value in `other` wins, an empty one keeps the existing value.
    pub fn merge(&self, other: &StyleAttributes) -> StyleAttributes {
        let mut merged = self.clone();
        for (key, value) in other.values.iter().filter(|(_, value)| !value.is_empty()) {
            merged.values.insert(key.clone(), value.clone());
        }
        merged
    }
}

/// A styled column range `[start, end)` on a single line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleSpan {
    /// Attributes applied to the range.
    pub attributes: StyleAttributes,
    /// Inclusive start column.
    pub start: usize,
    /// Exclusive end column.
    pub end: usize,
}

impl StyleSpan {
    /// Create a new span.
    pub fn new(attributes: StyleAttributes, start: usize, end: usize) -> Self {
        Self {
            attributes,
            start,
            end,
        }
    }

    /// Width of the span in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether the span covers `column`.
    pub fn contains(&self, column: usize) -> bool {
        self.start <= column && column < self.end
    }

    /// Whether the span shares at least one character with `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// Whether the span overlaps or is adjacent to `[start, end)`.
    pub fn touches(&self, start: usize, end: usize) -> bool {
        self.start <= end && start <= self.end
    }

    /// Return a copy moved by `delta` columns to the right.
    pub(crate) fn shifted(&self, delta: usize) -> Self {
        Self::new(self.attributes.clone(), self.start + delta, self.end + delta)
    }
}
