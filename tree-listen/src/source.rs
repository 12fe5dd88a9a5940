//! Boundary trait for tree-structured store SDKs.

use listen_core::ListenError;

use crate::event::TreeEvent;

/// Callback invoked once per delivered change, with the snapshot and the
/// previous-sibling key.
pub type ChangeHandler<S> = Box<dyn FnMut(S, Option<String>) + Send>;

/// Callback invoked if delivery fails. The store calls it at most once, and
/// no change callbacks follow it.
pub type ErrorHandler = Box<dyn FnOnce(ListenError) + Send>;

/// A reference or query handle into a tree-structured store.
///
/// Implementations belong to the store SDK; this crate consumes only the
/// registration surface. Validity of the underlying reference, delivery
/// semantics, reconnection, and query evaluation are all the SDK's concern.
/// Each adapted stream performs exactly one `register` and, when it goes
/// away, exactly one matching `deregister`.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Handlers may be invoked from the
/// SDK's own delivery threads, and some SDKs invoke the change handler
/// synchronously inside `register` when state is already cached.
pub trait TreeSource: Send + Sync {
    /// Snapshot payload delivered with each change.
    type Snapshot: Send + 'static;

    /// Token identifying one registration, passed back on `deregister`.
    type Token: Send + 'static;

    /// Register a listener for `event` on this reference.
    ///
    /// The returned token identifies the registration for the lifetime of
    /// the listener.
    fn register(
        &self,
        event: TreeEvent,
        on_change: ChangeHandler<Self::Snapshot>,
        on_error: ErrorHandler,
    ) -> Self::Token;

    /// Remove the listener identified by `token`.
    ///
    /// Expected to be fast and non-blocking; any asynchronous teardown the
    /// SDK performs afterwards must not invoke the handlers again.
    fn deregister(&self, event: TreeEvent, token: Self::Token);
}
