//! Document configuration.

use crate::style::StyleAttributes;

/// Default bound on the undo and redo stacks.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 1000;

/// Per-document settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Maximum number of entries kept on each of the undo and redo stacks.
    pub max_history_size: usize,
    /// Attributes that apply to text not covered by any span.
    ///
    /// Only consulted by [`Document::effective_style_at`](crate::Document::effective_style_at);
    /// it is never written into the buffer.
    pub default_style: StyleAttributes,
}

impl DocumentConfig {
    /// Set the history bound.
    pub fn with_max_history_size(mut self, max_history_size: usize) -> Self {
        self.max_history_size = max_history_size;
        self
    }

    /// Set the default style.
    pub fn with_default_style(mut self, default_style: StyleAttributes) -> Self {
        self.default_style = default_style;
        self
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            default_style: StyleAttributes::new(),
        }
    }
}
