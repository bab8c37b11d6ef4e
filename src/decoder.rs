//! TUIO cursor-bundle decoder.
//!
//! A TUIO source delivers one bundle per sensor update as an `alive`
//! message, zero or more `set` messages, and a terminating `fseq` message.
//! [`BundleDecoder`] reduces that message sequence into complete
//! [`CursorFrame`]s: accumulation state stays private, and a frame is only
//! handed out once its bundle is finished, so consumers can never observe a
//! half-built bundle.
//!
//! The decoder performs no I/O and no synchronization. It is owned by the
//! driver task, which calls [`BundleDecoder::handle`] once per message and
//! publishes whatever frames come back.

use tracing::{debug, trace};

use crate::config::OrphanSetPolicy;
use crate::types::{CursorFrame, CursorMessage, CursorPoint};

/// State reducer from cursor messages to published frames.
///
/// State machine: idle until an `alive` arrives, accumulating until the
/// matching `fseq`. An `alive` received while accumulating restarts the
/// bundle, discarding the unterminated one; that is how the decoder
/// self-heals when a source's `fseq` datagram is lost.
#[derive(Debug)]
pub struct BundleDecoder {
    max_cursors: usize,
    orphan_set_policy: OrphanSetPolicy,
    pending: Option<Vec<CursorPoint>>,
}

impl BundleDecoder {
    /// Create a decoder that caps each frame at `max_cursors` points.
    pub fn new(max_cursors: usize, orphan_set_policy: OrphanSetPolicy) -> Self {
        Self { max_cursors, orphan_set_policy, pending: None }
    }

    /// Feed one message; returns a frame when this message completed a bundle.
    ///
    /// The returned frame owns the accumulated points: the pending bundle
    /// is moved out, not copied, and the next `alive` starts a fresh one.
    pub fn handle(&mut self, msg: CursorMessage) -> Option<CursorFrame> {
        match msg {
            CursorMessage::Alive { session_ids } => {
                if let Some(stale) = &self.pending {
                    debug!(
                        discarded = stale.len(),
                        "alive received mid-bundle, restarting accumulation"
                    );
                }
                trace!(alive = session_ids.len(), "bundle started");
                self.pending = Some(Vec::with_capacity(self.max_cursors));
                None
            }
            CursorMessage::Set(point) => {
                match &mut self.pending {
                    Some(bundle) => {
                        // Points beyond the cap are dropped here rather than
                        // at fseq so a misbehaving source cannot grow the
                        // bundle without bound.
                        if bundle.len() < self.max_cursors {
                            bundle.push(point);
                        } else {
                            trace!(
                                session_id = point.session_id,
                                max = self.max_cursors,
                                "dropping cursor beyond frame capacity"
                            );
                        }
                    }
                    None => match self.orphan_set_policy {
                        OrphanSetPolicy::Ignore => {
                            debug!(
                                session_id = point.session_id,
                                "set received before alive, ignoring"
                            );
                        }
                        OrphanSetPolicy::StartBundle => {
                            debug!(
                                session_id = point.session_id,
                                "set received before alive, starting bundle"
                            );
                            self.pending = Some(vec![point]);
                        }
                    },
                }
                None
            }
            CursorMessage::Fseq { frame } => match self.pending.take() {
                Some(bundle) => {
                    trace!(frame, cursors = bundle.len(), "bundle complete");
                    Some(CursorFrame::new(bundle, frame))
                }
                None => {
                    debug!(frame, "fseq with no bundle in progress, ignoring");
                    None
                }
            },
            CursorMessage::Unrecognized { command } => {
                debug!(command, "unrecognized cursor profile command");
                None
            }
        }
    }
}
