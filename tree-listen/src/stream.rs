//! Callback-to-stream bridge for tree store listeners.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use listen_core::{DeferEmissions, ListenError, Registration};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::event::{TreeChange, TreeEvent};
use crate::source::{ChangeHandler, ErrorHandler, TreeSource};

/// What the listener callbacks push across to the stream side.
enum ListenerMessage<T> {
    Change(TreeChange<T>),
    Failed(ListenError),
}

/// Create a change stream from a tree store reference or query.
///
/// Registers one listener for `event` with the store and emits one
/// [`TreeChange`] per delivery, in delivery order. A delivery failure
/// surfaces as a terminal `Err` item, after which the stream is exhausted.
/// Dropping the stream deregisters the listener synchronously; the listener
/// is deregistered exactly once on every exit path.
///
/// Every emission lands one scheduling turn after it becomes ready. Store
/// SDKs may invoke the change callback synchronously inside registration
/// when state is already cached; the deferral keeps such a delivery from
/// being observed inside the turn that created the stream.
///
/// Each call registers its own independent listener. To listen again after
/// an error, call `from_ref` again.
pub fn from_ref<S>(source: &Arc<S>, event: TreeEvent) -> TreeChangeStream<S::Snapshot>
where
    S: TreeSource + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    let change_tx = tx.clone();
    let on_change: ChangeHandler<S::Snapshot> = Box::new(move |snapshot, prev_key| {
        trace!(%event, "change delivered");
        let _ = change_tx.send(ListenerMessage::Change(TreeChange {
            snapshot,
            prev_key,
            event,
        }));
    });
    let on_error: ErrorHandler = Box::new(move |error| {
        let _ = tx.send(ListenerMessage::Failed(error));
    });

    let token = source.register(event, on_change, on_error);
    debug!(%event, "registered tree listener");

    let teardown_source = Arc::clone(source);
    let registration = Registration::new(move || {
        debug!(%event, "deregistering tree listener");
        teardown_source.deregister(event, token);
    });

    TreeChangeStream {
        inner: DeferEmissions::new(ChangeReceiver {
            rx,
            registration,
            done: false,
        }),
    }
}

/// Stream of changes for one tree listener registration.
///
/// Created by [`from_ref`]. Yields `Ok(TreeChange)` per delivery and at most
/// one terminal `Err(ListenError)`. Dropping the stream deregisters the
/// underlying listener.
pub struct TreeChangeStream<T> {
    inner: DeferEmissions<ChangeReceiver<T>>,
}

impl<T> Stream for TreeChangeStream<T> {
    type Item = Result<TreeChange<T>, ListenError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Receiver half of the listener bridge, before deferral is applied.
struct ChangeReceiver<T> {
    rx: mpsc::UnboundedReceiver<ListenerMessage<T>>,
    registration: Registration,
    done: bool,
}

impl<T> Stream for ChangeReceiver<T> {
    type Item = Result<TreeChange<T>, ListenError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if this.done {
            return Poll::Ready(None);
        }
        match this.rx.poll_recv(cx) {
            Poll::Ready(Some(ListenerMessage::Change(change))) => Poll::Ready(Some(Ok(change))),
            Poll::Ready(Some(ListenerMessage::Failed(error))) => {
                // Terminal: the listener is deregistered here rather than at
                // drop, and anything still queued behind the error is never
                // surfaced.
                this.done = true;
                this.registration.dispose();
                Poll::Ready(Some(Err(error)))
            }
            Poll::Ready(None) => {
                this.done = true;
                this.registration.dispose();
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Minimal source that counts lifecycle calls and keeps the handlers.
    #[derive(Default)]
    struct CountingSource {
        registered: AtomicUsize,
        deregistered: AtomicUsize,
        handlers: Mutex<Vec<(ChangeHandler<String>, Option<ErrorHandler>)>>,
    }

    impl CountingSource {
        fn fire(&self, snapshot: &str) {
            for (on_change, _) in self.handlers.lock().unwrap().iter_mut() {
                on_change(snapshot.to_string(), None);
            }
        }

        fn fail(&self, error: ListenError) {
            for (_, on_error) in self.handlers.lock().unwrap().iter_mut() {
                if let Some(on_error) = on_error.take() {
                    on_error(error.clone());
                }
            }
        }
    }

    impl TreeSource for CountingSource {
        type Snapshot = String;
        type Token = usize;

        fn register(
            &self,
            _event: TreeEvent,
            on_change: ChangeHandler<String>,
            on_error: ErrorHandler,
        ) -> usize {
            let mut handlers = self.handlers.lock().unwrap();
            handlers.push((on_change, Some(on_error)));
            self.registered.fetch_add(1, Ordering::SeqCst);
            handlers.len() - 1
        }

        fn deregister(&self, _event: TreeEvent, _token: usize) {
            self.deregistered.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn registers_one_listener_per_stream() {
        let source = Arc::new(CountingSource::default());
        let _stream = from_ref(&source, TreeEvent::Value);
        assert_eq!(source.registered.load(Ordering::SeqCst), 1);
        assert_eq!(source.deregistered.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn drop_deregisters_exactly_once() {
        let source = Arc::new(CountingSource::default());
        let stream = from_ref(&source, TreeEvent::Value);
        drop(stream);
        assert_eq!(source.deregistered.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delivery_reaches_the_stream() {
        let source = Arc::new(CountingSource::default());
        let mut stream = from_ref(&source, TreeEvent::ChildAdded);
        source.fire("child");

        let change = stream.next().await.unwrap().unwrap();
        assert_eq!(change.snapshot, "child");
        assert_eq!(change.event, TreeEvent::ChildAdded);
    }

    #[tokio::test]
    async fn failure_terminates_and_deregisters() {
        let source = Arc::new(CountingSource::default());
        let mut stream = from_ref(&source, TreeEvent::Value);
        source.fail(ListenError::PermissionDenied("no read".to_string()));

        assert!(matches!(
            stream.next().await,
            Some(Err(ListenError::PermissionDenied(_)))
        ));
        assert!(stream.next().await.is_none());
        // Deregistered at the terminal error, not at drop.
        assert_eq!(source.deregistered.load(Ordering::SeqCst), 1);
        drop(stream);
        assert_eq!(source.deregistered.load(Ordering::SeqCst), 1);
    }
}
