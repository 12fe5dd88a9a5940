//! # listen-core
//!
//! Shared primitives for turning callback-based listener registrations into
//! async streams.
//!
//! Store-specific adapter crates build on three pieces: a [`Registration`]
//! guard that runs listener teardown exactly once, a [`DeferEmissions`]
//! combinator that pushes each emission to the next scheduling turn, and the
//! [`ListenError`] type that carries delivery failures reported by the
//! wrapped store SDK. A [`SyncStream`] wrapper is included for consumers
//! that cannot use async/await.

mod defer;
mod error;
mod registration;
mod sync;

pub use defer::*;
pub use error::*;
pub use registration::*;
pub use sync::*;
