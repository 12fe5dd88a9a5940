//! Error types shared by the listener adapter crates.

/// A delivery failure reported by an external store listener.
///
/// The wrapped store SDK is the only producer of these values. Adapters
/// forward them verbatim as the terminal item of a change stream; they never
/// retry, reclassify, or recover locally. A consumer that wants retry or
/// backoff re-registers by calling the adapter function again.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ListenError {
    /// The store rejected the listen for lack of permission
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The transport to the store failed
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store cancelled the listen
    #[error("listen cancelled: {0}")]
    Cancelled(String),

    /// The store reported an internal fault
    #[error("internal store error: {0}")]
    Internal(String),
}
