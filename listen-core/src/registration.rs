//! Teardown guard for external listener registrations.

use std::fmt;

/// Owns the teardown of one external listener registration.
///
/// Exactly one `Registration` exists per adapted stream. The teardown runs
/// at most once, on whichever comes first: an explicit
/// [`dispose`](Registration::dispose) when the stream terminates on its own
/// (error or completion), or drop when the consumer cancels. Every exit path
/// therefore deregisters the listener, and none deregisters it twice.
pub struct Registration {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl Registration {
    /// Wrap a teardown closure.
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Run the teardown now, if it has not already run.
    pub fn dispose(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    /// Whether the teardown has already run.
    pub fn is_disposed(&self) -> bool {
        self.teardown.is_none()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
