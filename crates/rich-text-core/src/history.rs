//! Bounded undo/redo log.
//!
//! Each entry pairs an [`Operation`] with the [`OperationMetadata`] captured when it ran.
//! Undo applies the inverse operation without recording it, then restores the inline spans of
//! the touched lines and every rich span the operation disturbed, so the document returns to
//! exactly the state it had before the edit.

use crate::engine::EditEngine;
use crate::operation::{Operation, OperationMetadata};
use std::collections::VecDeque;
use tracing::debug;

/// A recorded edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The operation as it was applied.
    pub operation: Operation,
    /// What the operation destroyed.
    pub metadata: OperationMetadata,
}

/// Undo and redo stacks with a shared capacity.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
    max_size: usize,
}

impl History {
    /// Create an empty history holding at most `max_size` entries per stack.
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_size,
        }
    }

    /// Capacity of each stack.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable entries.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable entries.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Most recent undoable entry.
    pub fn peek_undo(&self) -> Option<&HistoryEntry> {
        self.undo_stack.back()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Record a freshly applied edit. Clears the redo stack.
    pub fn record(&mut self, operation: Operation, metadata: OperationMetadata) {
        self.redo_stack.clear();
        Self::push_bounded(
            &mut self.undo_stack,
            self.max_size,
            HistoryEntry {
                operation,
                metadata,
            },
        );
        debug!(undo_depth = self.undo_stack.len(), "recorded edit");
    }

    /// Undo the most recent edit. Returns the inverse operation that was applied.
    pub fn undo(&mut self, engine: &mut EditEngine) -> Option<Operation> {
        let entry = self.undo_stack.pop_back()?;
        let inverse = entry.operation.inverse(&entry.metadata);
        let applied = engine.apply(&inverse, false);

        if let Some(snapshot) = &entry.metadata.line_spans_before {
            engine.restore_line_spans(snapshot);
        }

        let anchor = entry.operation.anchor();
        let tracker = engine.rich_spans_mut();
        for id in entry
            .metadata
            .created_rich_spans
            .iter()
            .chain(&applied.created_rich_spans)
        {
            tracker.remove_span(*id);
        }
        for preserved in &entry.metadata.preserved_rich_spans {
            tracker.remove_span(preserved.id);
            tracker.insert_with_id(preserved.id, preserved.restore(anchor));
        }

        debug!(
            kind = entry.operation.kind(),
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len() + 1,
            "undo"
        );
        Self::push_bounded(&mut self.redo_stack, self.max_size, entry);
        Some(inverse)
    }

    /// Re-apply the most recently undone edit. Returns the operation that was applied.
    ///
    /// Metadata is captured afresh so that a later undo sees the current rich span ids.
    pub fn redo(&mut self, engine: &mut EditEngine) -> Option<Operation> {
        let entry = self.redo_stack.pop_back()?;
        let metadata = engine.apply(&entry.operation, true);
        let operation = entry.operation;

        debug!(
            kind = operation.kind(),
            undo_depth = self.undo_stack.len() + 1,
            redo_depth = self.redo_stack.len(),
            "redo"
        );
        Self::push_bounded(
            &mut self.undo_stack,
            self.max_size,
            HistoryEntry {
                operation: operation.clone(),
                metadata,
            },
        );
        Some(operation)
    }

    fn push_bounded(stack: &mut VecDeque<HistoryEntry>, max_size: usize, entry: HistoryEntry) {
        if max_size == 0 {
            return;
        }
        while stack.len() >= max_size {
            stack.pop_front();
        }
        stack.push_back(entry);
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_HISTORY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::LineBuffer;
    use crate::position::{Position, Range};

    fn apply_recorded(engine: &mut EditEngine, history: &mut History, op: Operation) {
        let op = engine.clamp_operation(op);
        let metadata = engine.apply(&op, true);
        history.record(op, metadata);
    }

    #[test]
    fn test_undo_redo_insert() {
        let mut engine = EditEngine::new(LineBuffer::from_text("abc"));
        let mut history = History::new(10);

        apply_recorded(&mut engine, &mut history, Operation::insert(Position::new(0, 1), "XY"));
        assert_eq!(engine.buffer().text(), "aXYbc");

        let inverse = history.undo(&mut engine);
        assert!(inverse.is_some());
        assert_eq!(engine.buffer().text(), "abc");
        assert!(history.can_redo());

        history.redo(&mut engine);
        assert_eq!(engine.buffer().text(), "aXYbc");
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut engine = EditEngine::new(LineBuffer::new());
        let mut history = History::new(3);

        for idx in 0..5 {
            apply_recorded(
                &mut engine,
                &mut history,
                Operation::insert(Position::new(0, idx), "x"),
            );
        }
        assert_eq!(history.undo_depth(), 3);

        while history.undo(&mut engine).is_some() {}
        assert_eq!(engine.buffer().text(), "xx");
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut engine = EditEngine::new(LineBuffer::from_text("abc"));
        let mut history = History::new(10);

        apply_recorded(
            &mut engine,
            &mut history,
            Operation::delete(Range::on_line(0, 0, 1)),
        );
        history.undo(&mut engine);
        assert!(history.can_redo());

        apply_recorded(&mut engine, &mut history, Operation::insert(Position::new(0, 3), "d"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut engine = EditEngine::new(LineBuffer::from_text("abc"));
        let mut history = History::new(0);
        apply_recorded(&mut engine, &mut history, Operation::insert(Position::new(0, 0), "x"));
        assert!(!history.can_undo());
        assert!(history.undo(&mut engine).is_none());
    }
}
