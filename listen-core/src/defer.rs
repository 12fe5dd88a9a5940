//! One-turn emission deferral.
//!
//! Some store SDKs invoke a freshly registered callback synchronously,
//! inside the registration call itself. Without intervention the first
//! change can be queued before the consumer has attached, and a poll-level
//! consumer would observe it inside the same scheduling turn that created
//! the stream. [`DeferEmissions`] normalizes this: every ready item is held
//! back until the next wake cycle. The combinator is the single place this
//! workaround lives; removing it does not touch subscriber logic.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

/// Stream combinator that holds each ready item back by one wake cycle.
///
/// When the inner stream yields an item, the combinator stages it, schedules
/// an immediate wake, and reports `Pending`; the staged item is released on
/// the following poll. The deferral applies to every item, not only the
/// first. Relative order is unchanged, and end-of-stream passes through
/// undeferred.
pub struct DeferEmissions<S: Stream> {
    inner: S,
    staged: Option<S::Item>,
}

impl<S: Stream + Unpin> DeferEmissions<S> {
    /// Wrap a stream so each emission lands one scheduling turn later.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            staged: None,
        }
    }
}

impl<S: Stream + Unpin> Unpin for DeferEmissions<S> {}

impl<S: Stream + Unpin> Stream for DeferEmissions<S> {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if let Some(item) = this.staged.take() {
            return Poll::Ready(Some(item));
        }
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                this.staged = Some(item);
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
