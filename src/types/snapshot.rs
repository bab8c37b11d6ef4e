//! Published snapshot type for the stream-based architecture

use std::sync::Arc;

use super::CursorPoint;

/// One complete, published bundle of active touch points.
///
/// This is the fundamental data unit that flows through the system: the
/// decoder turns raw protocol messages into `CursorFrame`s, and consumers
/// only ever observe whole frames. A frame is never mutated after
/// publication; the driver replaces the current frame wholesale when the
/// next bundle completes.
///
/// Cursor storage is `Arc`-backed, so cloning a frame (or handing it to
/// many subscribers) is cheap and never copies the points.
#[derive(Debug, Clone)]
pub struct CursorFrame {
    /// Active touch points in arrival order, at most the configured maximum
    pub cursors: Arc<[CursorPoint]>,

    /// Frame sequence number from the `fseq` message that completed this
    /// bundle. Informational; no ordering or deduplication is derived from it.
    pub frame: i32,
}

impl CursorFrame {
    /// Create a frame from an accumulated bundle.
    pub fn new(cursors: Vec<CursorPoint>, frame: i32) -> Self {
        Self { cursors: cursors.into(), frame }
    }

    /// Frame with no active touches.
    pub fn empty(frame: i32) -> Self {
        Self { cursors: Arc::from([]), frame }
    }

    /// Number of active touch points.
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// True when no touches are active.
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
