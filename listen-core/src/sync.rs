//! Blocking wrapper for consuming streams without async/await.
//!
//! Provides a synchronous interface for code that can't use async/await,
//! such as CLI applications or tests.

use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::runtime::Handle;

/// A synchronous wrapper around a change stream.
///
/// Useful for CLI applications or other synchronous code that needs to
/// consume live changes. Dropping the wrapper drops the underlying stream,
/// with whatever cancellation semantics that stream carries.
///
/// # Example
///
/// ```rust,ignore
/// let changes = SyncStream::new(stream, runtime.handle().clone());
///
/// for change in changes {
///     println!("delivered: {change:?}");
/// }
/// ```
pub struct SyncStream<S: Stream + Unpin> {
    inner: S,
    rt: Handle,
}

impl<S: Stream + Unpin> SyncStream<S> {
    /// Create a new SyncStream.
    ///
    /// # Arguments
    ///
    /// * `inner` - The stream to wrap
    /// * `rt` - A handle to a Tokio runtime for blocking operations
    pub fn new(inner: S, rt: Handle) -> Self {
        Self { inner, rt }
    }

    /// Block until the next item is available.
    ///
    /// Returns `None` once the stream has ended.
    pub fn recv(&mut self) -> Option<S::Item> {
        self.rt.block_on(self.inner.next())
    }

    /// Block until the next item or until the timeout expires.
    ///
    /// Returns `None` if the timeout expires or the stream has ended.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<S::Item> {
        self.rt
            .block_on(async { tokio::time::timeout(timeout, self.inner.next()).await })
            .unwrap_or(None)
    }

    /// Consume the wrapper and get the inner stream back.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Stream + Unpin> Iterator for SyncStream<S> {
    type Item = S::Item;

    /// Block until the next item.
    ///
    /// Returns `None` once the stream has ended.
    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use tokio::runtime::Runtime;

    #[test]
    fn recv_yields_items_then_none() {
        let rt = Runtime::new().unwrap();
        let mut sync = SyncStream::new(stream::iter(vec![1, 2]), rt.handle().clone());

        assert_eq!(sync.recv(), Some(1));
        assert_eq!(sync.recv(), Some(2));
        assert_eq!(sync.recv(), None);
    }

    #[test]
    fn iterator_drains_the_stream_in_order() {
        let rt = Runtime::new().unwrap();
        let sync = SyncStream::new(stream::iter(vec!["a", "b", "c"]), rt.handle().clone());

        let items: Vec<&str> = sync.collect();
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn recv_timeout_returns_none_when_nothing_arrives() {
        let rt = Runtime::new().unwrap();
        let mut sync = SyncStream::new(stream::pending::<u8>(), rt.handle().clone());

        assert_eq!(sync.recv_timeout(Duration::from_millis(20)), None);
    }

    #[test]
    fn recv_timeout_yields_an_available_item() {
        let rt = Runtime::new().unwrap();
        let mut sync = SyncStream::new(stream::iter(vec![9]), rt.handle().clone());

        assert_eq!(sync.recv_timeout(Duration::from_secs(1)), Some(9));
    }
}
