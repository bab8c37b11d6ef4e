//! Typed TUIO 2D-cursor protocol messages

use super::CursorPoint;

/// One decoded TUIO 2D-cursor message.
///
/// A TUIO source transmits one OSC bundle per sensor update, containing an
/// `alive` message, zero or more `set` messages (one per active contact),
/// and a terminating `fseq` message. The OSC translation layer produces one
/// `CursorMessage` per wire message; the decoder consumes them in arrival
/// order.
///
/// Well-typedness is guaranteed by construction: malformed wire data is
/// rejected during translation and never reaches the decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum CursorMessage {
    /// Start of a bundle; lists the session ids currently in contact.
    ///
    /// The id list is carried for diagnostics but the decoder derives the
    /// active set from the `Set` messages that follow, as the original
    /// TUIO 1.1 cursor profile intends.
    Alive { session_ids: Vec<i32> },

    /// One active contact's position and motion state.
    Set(CursorPoint),

    /// End of a bundle, carrying the source's frame sequence number.
    Fseq { frame: i32 },

    /// A message on the cursor profile with an unknown command string.
    ///
    /// Surfaced so callers can log it; never alters decoder state.
    Unrecognized { command: String },
}
