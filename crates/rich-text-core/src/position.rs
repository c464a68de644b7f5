//! Logical coordinates.
//!
//! A [`Position`] addresses a character by logical line and column (both zero-based, counted in
//! Unicode scalar values). A [`Range`] is a half-open `[start, end)` pair of positions.

use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Half-open range between two positions.
///
/// A range is *valid* when `end > start`. Degenerate ranges (`start == end`) are used as
/// insertion points and never persist as span boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// Inclusive start position.
    pub start: Position,
    /// Exclusive end position.
    pub end: Position,
}

impl Range {
    /// Create a range from two positions, as given.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a range from two positions in either order.
    pub fn ordered(a: Position, b: Position) -> Self {
        if a <= b {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    /// Create an empty range at `position`.
    pub const fn point(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Convenience constructor for a range on a single line.
    pub const fn on_line(line: usize, start_column: usize, end_column: usize) -> Self {
        Self::new(
            Position::new(line, start_column),
            Position::new(line, end_column),
        )
    }

    /// Whether both endpoints are on the same line.
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Whether the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `end` is strictly after `start`.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Whether `position` lies inside `[start, end)`.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }

    /// Whether two ranges share at least one character.
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether two ranges overlap or share an endpoint.
    pub fn touches(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Check whether this document-absolute range intersects the segment `[start_column,
    /// end_column)` of `line`.
    ///
    /// On the first line of a multi-line range only the start column is tested, on the last
    /// line only the end column; lines strictly between are always covered.
    pub fn intersects_line_segment(
        &self,
        line: usize,
        start_column: usize,
        end_column: usize,
    ) -> bool {
        if line < self.start.line || line > self.end.line {
            return false;
        }

        if self.is_single_line() {
            return self.start.column < end_column && self.end.column > start_column;
        }

        if line == self.start.line {
            self.start.column < end_column
        } else if line == self.end.line {
            self.end.column > start_column
        } else {
            true
        }
    }
}
