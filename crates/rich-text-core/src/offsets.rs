//! Offset mapping between logical positions and flat character indices.
//!
//! A flat index counts every character of every line plus one synthetic newline per line
//! boundary. Both directions clamp out-of-range input to the document bounds.

use crate::buffer::LineBuffer;
use crate::position::Position;

impl LineBuffer {
    /// Flat character index of `position`.
    ///
    /// A line past the end maps to the end of the document; a column past the end of its line
    /// maps to the end of that line.
    pub fn position_to_index(&self, position: Position) -> usize {
        if position.line >= self.line_count() {
            return self.char_count();
        }

        let line_start: usize = self.lines()[..position.line]
            .iter()
            .map(|line| line.len() + 1)
            .sum();

        line_start + position.column.min(self.line_len(position.line))
    }

    /// Logical position of flat character index `index`, clamped to the end of the document.
    pub fn index_to_position(&self, index: usize) -> Position {
        let mut remaining = index;

        for (line_idx, line) in self.lines().iter().enumerate() {
            if remaining <= line.len() {
                return Position::new(line_idx, remaining);
            }
            remaining -= line.len() + 1;
        }

        self.end_position()
    }
}
