//! # tree-listen
//!
//! Live change streams over tree-structured realtime stores.
//!
//! A tree store exposes an event-kind-indexed registration surface: one
//! listener per `(reference, event kind)` pair, delivering a snapshot and an
//! optional previous-sibling key per change. [`from_ref`] adapts that
//! surface into a `futures::Stream` of [`TreeChange`] values. The store SDK
//! stays an opaque collaborator behind the [`TreeSource`] trait; this crate
//! owns only the callback-to-stream bridge and the listener lifecycle.

mod event;
mod source;
mod stream;

pub use event::*;
pub use source::*;
pub use stream::*;
