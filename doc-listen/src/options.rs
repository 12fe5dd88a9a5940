//! Listener options for document store registrations.

use serde::{Deserialize, Serialize};

/// Options forwarded verbatim to the document store's snapshot listener.
///
/// The store defines what each option means; this crate interprets none of
/// them. The single adapter-owned default: metadata-only changes are
/// excluded unless a caller opts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapshotOptions {
    /// Whether deliveries fire for changes that only touch snapshot
    /// metadata, with no change to the underlying data
    pub include_metadata_changes: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            include_metadata_changes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_only_changes_are_excluded_by_default() {
        assert!(!SnapshotOptions::default().include_metadata_changes);
    }

    #[test]
    fn test_snapshot_options_serde() {
        let options: SnapshotOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SnapshotOptions::default());

        let options: SnapshotOptions =
            serde_json::from_str(r#"{"includeMetadataChanges":true}"#).unwrap();
        assert!(options.include_metadata_changes);

        let encoded = serde_json::to_string(&options).unwrap();
        assert_eq!(encoded, r#"{"includeMetadataChanges":true}"#);
    }
}
