//! Callback-to-stream bridge for document store snapshot listeners.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use listen_core::{ListenError, Registration};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::options::SnapshotOptions;
use crate::source::{DocSource, SnapshotObserver};

/// What the observer callbacks push across to the stream side.
enum ListenerMessage<T> {
    Snapshot(T),
    Failed(ListenError),
    Complete,
}

/// Create a snapshot stream from a document reference or query, with
/// default options (metadata-only changes excluded).
///
/// See [`from_ref_with_options`].
pub fn from_ref<S>(source: &S) -> SnapshotStream<S::Snapshot>
where
    S: DocSource,
{
    from_ref_with_options(source, SnapshotOptions::default())
}

/// Create a snapshot stream from a document reference or query.
///
/// Registers one snapshot listener with the store, forwarding `options`
/// verbatim, and emits one snapshot per delivery, in delivery order. A
/// delivery failure surfaces as a terminal `Err` item; if the store
/// completes delivery on its own the stream simply ends. Dropping the
/// stream unsubscribes the listener synchronously; the listener is
/// unsubscribed exactly once on every exit path.
///
/// Each call registers its own independent listener. To listen again after
/// an error, call the function again.
pub fn from_ref_with_options<S>(source: &S, options: SnapshotOptions) -> SnapshotStream<S::Snapshot>
where
    S: DocSource,
{
    let (tx, rx) = mpsc::unbounded_channel();

    let snapshot_tx = tx.clone();
    let complete_tx = tx.clone();
    let observer = SnapshotObserver {
        on_next: Box::new(move |snapshot| {
            trace!("snapshot delivered");
            let _ = snapshot_tx.send(ListenerMessage::Snapshot(snapshot));
        }),
        on_error: Box::new(move |error| {
            let _ = tx.send(ListenerMessage::Failed(error));
        }),
        on_complete: Box::new(move || {
            let _ = complete_tx.send(ListenerMessage::Complete);
        }),
    };

    let unsubscribe = source.register_snapshot_listener(options, observer);
    debug!(
        include_metadata_changes = options.include_metadata_changes,
        "registered snapshot listener"
    );

    SnapshotStream {
        rx,
        registration: Registration::new(move || {
            debug!("unsubscribing snapshot listener");
            unsubscribe();
        }),
        done: false,
    }
}

/// Stream of snapshots for one document listener registration.
///
/// Created by [`from_ref`] or [`from_ref_with_options`]. Yields one `Ok`
/// snapshot per delivery and at most one terminal `Err(ListenError)`; ends
/// without an item if the store completes the listen itself. Dropping the
/// stream unsubscribes the underlying listener.
pub struct SnapshotStream<T> {
    rx: mpsc::UnboundedReceiver<ListenerMessage<T>>,
    registration: Registration,
    done: bool,
}

impl<T> Stream for SnapshotStream<T> {
    type Item = Result<T, ListenError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if this.done {
            return Poll::Ready(None);
        }
        match this.rx.poll_recv(cx) {
            Poll::Ready(Some(ListenerMessage::Snapshot(snapshot))) => {
                Poll::Ready(Some(Ok(snapshot)))
            }
            Poll::Ready(Some(ListenerMessage::Failed(error))) => {
                // Terminal: unsubscribe here rather than at drop, and drop
                // anything still queued behind the error.
                this.done = true;
                this.registration.dispose();
                Poll::Ready(Some(Err(error)))
            }
            Poll::Ready(Some(ListenerMessage::Complete)) | Poll::Ready(None) => {
                this.done = true;
                this.registration.dispose();
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
