//! Source trait for cursor message streams

use crate::Result;
use crate::types::CursorMessage;

/// Trait for cursor message sources
///
/// Sources abstract over where protocol messages come from (a live UDP
/// socket, a recorded session) and handle their own timing internally.
/// The driver pulls messages one at a time and feeds them to the decoder.
#[async_trait::async_trait]
pub trait MessageSource: Send + 'static {
    /// Get the next cursor message
    ///
    /// Returns:
    /// - `Ok(Some(message))` - next message, in arrival order
    /// - `Ok(None)` - stream ended (normal termination, e.g. replay exhausted)
    /// - `Err(e)` - error occurred; retryable errors leave the source usable
    ///
    /// Each source handles timing internally:
    /// - Live: awaits the socket
    /// - Replay: paces playback to the recording's rate
    async fn next_message(&mut self) -> Result<Option<CursorMessage>>;

    /// Human-readable description of the source, for logging
    fn describe(&self) -> String;
}
