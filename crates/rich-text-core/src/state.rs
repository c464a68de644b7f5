//! Change notification.
//!
//! Every mutation of a [`Document`](crate::Document) bumps a monotonically increasing version
//! number and fans a [`StateChange`] out to all subscribers. Consumers that poll instead of
//! subscribing compare versions with
//! [`Document::has_changed_since`](crate::Document::has_changed_since).
//!
//! # Example
//!
//! ```rust
//! use rich_text_core::{Document, StateChangeType};
//! use std::sync::{Arc, Mutex};
//!
//! let mut doc = Document::new("Hello");
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! doc.subscribe(move |change| {
//!     if let Ok(mut seen) = sink.lock() {
//!         seen.push(change.change_type);
//!     }
//! });
//!
//! doc.insert_text(", World");
//! assert_eq!(seen.lock().unwrap().as_slice(), &[StateChangeType::DocumentModified]);
//! ```

use crate::operation::Operation;
use std::collections::BTreeMap;
use std::sync::Arc;

/// State change type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateChangeType {
    /// Text content modified
    DocumentModified,
    /// Inline styles changed without a text change
    StyleChanged,
    /// Rich spans added or removed
    RichSpansChanged,
    /// Cursor moved
    CursorMoved,
    /// Selection changed
    SelectionChanged,
}

/// State change record
#[derive(Debug, Clone)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
    /// The operation that was applied, for edits (including undo and redo).
    pub operation: Option<Arc<Operation>>,
}

impl StateChange {
    /// Create a change record without an operation.
    pub fn new(change_type: StateChangeType, old_version: u64, new_version: u64) -> Self {
        Self {
            change_type,
            old_version,
            new_version,
            operation: None,
        }
    }

    /// Attach the applied operation.
    pub fn with_operation(mut self, operation: Arc<Operation>) -> Self {
        self.operation = Some(operation);
        self
    }
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

/// Version counter plus subscriber registry.
#[derive(Default)]
pub(crate) struct ChangeNotifier {
    version: u64,
    next_subscription: u64,
    callbacks: BTreeMap<SubscriptionId, StateChangeCallback>,
}

impl ChangeNotifier {
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn subscribe(&mut self, callback: StateChangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.callbacks.insert(id, callback);
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.callbacks.remove(&id).is_some()
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Bump the version and notify every subscriber.
    pub(crate) fn publish(
        &mut self,
        change_type: StateChangeType,
        operation: Option<Arc<Operation>>,
    ) {
        let old_version = self.version;
        self.version += 1;

        let mut change = StateChange::new(change_type, old_version, self.version);
        if let Some(operation) = operation {
            change = change.with_operation(operation);
        }

        for callback in self.callbacks.values_mut() {
            callback(&change);
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("version", &self.version)
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_publish_bumps_version_and_notifies() {
        let mut notifier = ChangeNotifier::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        notifier.subscribe(Box::new(move |change| {
            sink.lock()
                .unwrap()
                .push((change.change_type, change.old_version, change.new_version));
        }));

        notifier.publish(StateChangeType::CursorMoved, None);
        notifier.publish(StateChangeType::StyleChanged, None);

        assert_eq!(notifier.version(), 2);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (StateChangeType::CursorMoved, 0, 1),
                (StateChangeType::StyleChanged, 1, 2),
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut notifier = ChangeNotifier::default();
        let count = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&count);
        let id = notifier.subscribe(Box::new(move |_| {
            *sink.lock().unwrap() += 1;
        }));

        notifier.publish(StateChangeType::DocumentModified, None);
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.publish(StateChangeType::DocumentModified, None);

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
