//! # doc-listen
//!
//! Live snapshot streams over document stores and their queries.
//!
//! A document store exposes a single unified registration surface: one
//! snapshot listener per reference or query, with next/error/complete
//! callbacks and an unsubscribe closure handed back at registration.
//! [`from_ref`] adapts that surface into a `futures::Stream` of snapshots.
//! The store SDK stays an opaque collaborator behind the [`DocSource`]
//! trait; this crate owns only the callback-to-stream bridge and the
//! listener lifecycle.

mod options;
mod source;
mod stream;

pub use options::*;
pub use source::*;
pub use stream::*;
