//! Boundary trait for document store SDKs.

use listen_core::ListenError;

use crate::options::SnapshotOptions;

/// Teardown closure handed back by the store for one snapshot listener.
///
/// Calling it removes the listener. The adapter calls it exactly once per
/// registration, on whichever exit path terminates the stream first.
pub type Unsubscribe = Box<dyn FnOnce() + Send>;

/// Callbacks handed to the document store for one registration.
pub struct SnapshotObserver<S> {
    /// Invoked once per delivered snapshot
    pub on_next: Box<dyn FnMut(S) + Send>,
    /// Invoked at most once if delivery fails; nothing follows it
    pub on_error: Box<dyn FnOnce(ListenError) + Send>,
    /// Invoked at most once if the store ends delivery on its own
    pub on_complete: Box<dyn FnOnce() + Send>,
}

/// A document reference or query handle into a document store.
///
/// Implementations belong to the store SDK; this crate consumes only the
/// registration surface. Reference validity, query evaluation, reconnection,
/// and delivery order are all the SDK's concern. Each adapted stream
/// performs exactly one registration and runs the returned [`Unsubscribe`]
/// exactly once when it goes away.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; observer callbacks may be invoked
/// from the SDK's own delivery threads.
pub trait DocSource: Send + Sync {
    /// Snapshot payload delivered on each change to the reference or query
    /// result.
    type Snapshot: Send + 'static;

    /// Register a snapshot listener with the given options.
    ///
    /// `options` are forwarded from the caller verbatim; their meaning is
    /// the store's to define.
    fn register_snapshot_listener(
        &self,
        options: SnapshotOptions,
        observer: SnapshotObserver<Self::Snapshot>,
    ) -> Unsubscribe;
}
