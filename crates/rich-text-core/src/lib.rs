#![warn(missing_docs)]
//! Rich Text Core - Headless Styled Document Engine
//!
//! # Overview
//!
//! `rich-text-core` maintains an editable, styled, multi-line text buffer and applies edits as
//! reversible operations. It keeps two kinds of annotations consistent while text is inserted,
//! deleted, replaced, and re-styled:
//!
//! - **Inline style spans**: per-line, half-open column ranges carrying an opaque attribute set
//!   (bold, italic, color, ...). Identical neighbours are always merged.
//! - **Rich spans**: document-absolute, possibly multi-line annotations (highlights, search
//!   matches, spell-check marks) tagged with an opaque numeric style.
//!
//! Rendering, input decoding, clipboard, and IME are left to the host. The engine works purely
//! on logical `(line, column)` positions counted in Unicode scalar values.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Document facade + Command layer            │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  History log (bounded undo/redo)            │  ← Reversibility
//! ├─────────────────────────────────────────────┤
//! │  Edit engine                                │  ← Operation application
//! ├──────────────────────┬──────────────────────┤
//! │  Span normalizer     │  Rich span tracker   │  ← Annotation math
//! ├──────────────────────┴──────────────────────┤
//! │  Line buffer + offset mapping               │  ← Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use rich_text_core::{Document, Position, Range, StyleAttributes, HIGHLIGHT_STYLE};
//!
//! let mut doc = Document::new("Hello World");
//!
//! // Inline styling
//! doc.add_style(Range::on_line(0, 0, 5), StyleAttributes::bold());
//!
//! // Out-of-band annotation
//! let id = doc.add_rich_span(Range::on_line(0, 6, 11), HIGHLIGHT_STYLE).unwrap();
//!
//! // Split the line inside the bold word
//! doc.set_cursor(Position::new(0, 2));
//! doc.insert_text("\n");
//! assert_eq!(doc.text(), "He\nllo World");
//! assert_eq!(doc.rich_span(id).unwrap().range, Range::on_line(1, 4, 9));
//!
//! // Undo restores text, styles, and annotations
//! assert!(doc.undo());
//! assert_eq!(doc.text(), "Hello World");
//! ```
//!
//! # Module Description
//!
//! - [`position`] - Logical positions and ranges
//! - [`style`] - Style attributes and inline spans
//! - [`normalizer`] - Per-line span normalization
//! - [`buffer`] - Line buffer
//! - [`rich_spans`] - Multi-line annotation tracking
//! - [`operation`] - Edit operations and undo metadata
//! - [`engine`] - Operation application
//! - [`history`] - Undo/redo log
//! - [`document`] - Document facade
//! - [`commands`] - Unified command interface
//! - [`state`] - Change notification
//! - [`search`] - Text search
//!
//! # Unicode Support
//!
//! - Columns count Unicode scalar values, never bytes
//! - Backspace, delete, and caret movement step over whole grapheme clusters
//! - Word ranges follow Unicode word boundaries

pub mod buffer;
pub mod commands;
pub mod config;
pub mod document;
pub mod engine;
pub mod history;
pub mod normalizer;
mod offsets;
pub mod operation;
pub mod position;
pub mod rich_spans;
pub mod search;
pub mod state;
pub mod style;
mod text;

pub use buffer::{Line, LineBuffer};
pub use commands::{
    Command, CommandError, CommandResult, CursorCommand, EditCommand, QueryCommand,
    RichSpanCommand, StyleCommand,
};
pub use config::{DEFAULT_MAX_HISTORY_SIZE, DocumentConfig};
pub use document::Document;
pub use engine::EditEngine;
pub use history::{History, HistoryEntry};
pub use normalizer::{Insertion, SpanEdit};
pub use operation::{
    LineSpansSnapshot, Operation, OperationMetadata, PreservedRichSpan, RelativePosition,
};
pub use position::{Position, Range};
pub use rich_spans::{
    HIGHLIGHT_STYLE, RichSpan, RichSpanId, RichSpanStyle, RichSpanTracker, SEARCH_MATCH_STYLE,
    SPELLING_ERROR_STYLE,
};
pub use search::{SearchError, SearchMatch, SearchOptions};
pub use state::{StateChange, StateChangeCallback, StateChangeType, SubscriptionId};
pub use style::{StyleAttributes, StyleSpan};
pub use text::StyledText;
