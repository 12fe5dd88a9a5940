//! Event kinds and change payloads for tree-structured stores.

use serde::{Deserialize, Serialize};

/// Listen event kinds a tree-structured store can deliver.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeEvent {
    /// The value at the reference changed
    Value,
    /// A child was added under the reference
    ChildAdded,
    /// A child under the reference changed
    ChildChanged,
    /// A child was removed from under the reference
    ChildRemoved,
    /// A child moved position under the reference
    ChildMoved,
}

impl TreeEvent {
    /// All event kinds, in declaration order.
    pub const ALL: [TreeEvent; 5] = [
        TreeEvent::Value,
        TreeEvent::ChildAdded,
        TreeEvent::ChildChanged,
        TreeEvent::ChildRemoved,
        TreeEvent::ChildMoved,
    ];

    /// The wire name of the event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeEvent::Value => "value",
            TreeEvent::ChildAdded => "child_added",
            TreeEvent::ChildChanged => "child_changed",
            TreeEvent::ChildRemoved => "child_removed",
            TreeEvent::ChildMoved => "child_moved",
        }
    }
}

impl std::fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One delivered change from a tree-structured store.
#[derive(Debug, Clone)]
pub struct TreeChange<T> {
    /// Snapshot of the state at the reference when the event fired
    pub snapshot: T,
    /// Key of the sibling immediately before this child, for ordered event
    /// kinds; `None` for the first child and for `value` events
    pub prev_key: Option<String>,
    /// The event kind that produced this change
    pub event: TreeEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_event_display() {
        assert_eq!(TreeEvent::Value.to_string(), "value");
        assert_eq!(TreeEvent::ChildAdded.to_string(), "child_added");
        assert_eq!(TreeEvent::ChildChanged.to_string(), "child_changed");
        assert_eq!(TreeEvent::ChildRemoved.to_string(), "child_removed");
        assert_eq!(TreeEvent::ChildMoved.to_string(), "child_moved");
    }

    #[test]
    fn test_tree_event_serde_round_trip() {
        for event in TreeEvent::ALL {
            let encoded = serde_json::to_string(&event).unwrap();
            assert_eq!(encoded, format!("\"{}\"", event.as_str()));
            let decoded: TreeEvent = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, event);
        }
    }

    #[test]
    fn test_all_lists_every_kind_once() {
        let mut seen = std::collections::HashSet::new();
        for event in TreeEvent::ALL {
            assert!(seen.insert(event.as_str()));
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn tree_change_clone_preserves_fields() {
        let change = TreeChange {
            snapshot: "payload".to_string(),
            prev_key: Some("sibling".to_string()),
            event: TreeEvent::ChildMoved,
        };
        let cloned = change.clone();
        assert_eq!(cloned.snapshot, "payload");
        assert_eq!(cloned.prev_key.as_deref(), Some("sibling"));
        assert_eq!(cloned.event, TreeEvent::ChildMoved);
    }
}
