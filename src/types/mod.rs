//! Core types for TUIO cursor data representation.
//!
//! - [`CursorPoint`] is one active touch contact from a `set` message
//! - [`CursorMessage`] is the typed form of one wire message
//! - [`CursorFrame`] is a complete published bundle, shared zero-copy via `Arc`
//! - [`UpdateRate`] controls how often a subscriber sees new frames

mod cursor;
mod message;
mod snapshot;
mod update_rate;

pub use cursor::CursorPoint;
pub use message::CursorMessage;
pub use snapshot::CursorFrame;
pub use update_rate::UpdateRate;
