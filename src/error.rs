//! Error types for TUIO stream processing.
//!
//! All errors implement `std::error::Error` and carry structured context.
//! Transient faults (socket hiccups, undecodable datagrams) are classified
//! as retryable so the driver loop can back off and continue instead of
//! tearing down the listener.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for TUIO stream operations.
pub type Result<T, E = TuioError> = std::result::Result<T, E>;

/// Main error type for TUIO stream operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TuioError {
    #[error("Socket error while {context}")]
    Socket {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode OSC packet: {details}")]
    OscDecode { details: String },

    #[error("Malformed {command:?} message: {details}")]
    Parse { command: String, details: String },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("Recording error: {reason}")]
    Recording {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },
}

impl TuioError {
    /// Returns whether the driver should keep running after this error.
    ///
    /// Socket and wire-level faults are transient: the next datagram may be
    /// fine. Configuration and recording errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            TuioError::Socket { .. } => true,
            TuioError::OscDecode { .. } => true,
            TuioError::Parse { .. } => true,
            TuioError::Timeout { .. } => true,
            TuioError::Config { .. } => false,
            TuioError::Recording { .. } => false,
        }
    }

    /// Helper constructor for socket errors with operation context.
    pub fn socket(context: impl Into<String>, source: std::io::Error) -> Self {
        TuioError::Socket { context: context.into(), source }
    }

    /// Helper constructor for OSC decode failures.
    pub fn osc_decode(details: impl Into<String>) -> Self {
        TuioError::OscDecode { details: details.into() }
    }

    /// Helper constructor for malformed message errors.
    pub fn parse(command: impl Into<String>, details: impl Into<String>) -> Self {
        TuioError::Parse { command: command.into(), details: details.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        TuioError::Config { reason: reason.into() }
    }

    /// Helper constructor for recording errors.
    pub fn recording(reason: impl Into<String>) -> Self {
        TuioError::Recording { reason: reason.into(), source: None }
    }

    /// Helper constructor for recording errors with an underlying cause.
    pub fn recording_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        TuioError::Recording { reason: reason.into(), source: Some(source) }
    }
}

impl From<std::io::Error> for TuioError {
    fn from(err: std::io::Error) -> Self {
        TuioError::Socket { context: "performing socket I/O".to_string(), source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_traits_validation() {
        // Compile-time check: TuioError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<TuioError>();

        let error = TuioError::osc_decode("truncated packet");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn retryability_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(TuioError::socket("receiving datagram", io).is_retryable());
        assert!(TuioError::osc_decode("bad tag").is_retryable());
        assert!(TuioError::parse("set", "expected 7 args").is_retryable());
        assert!(!TuioError::config("max_cursors must be nonzero").is_retryable());
        assert!(!TuioError::recording("empty recording").is_retryable());
    }

    #[test]
    fn messages_carry_context() {
        let err = TuioError::parse("set", "argument 2 is not a float");
        let msg = err.to_string();
        assert!(msg.contains("set"));
        assert!(msg.contains("argument 2"));

        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use");
        let err = TuioError::socket("binding UDP listener", io);
        assert!(err.to_string().contains("binding UDP listener"));
    }

    #[test]
    fn io_conversion_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::WouldBlock, "would block");
        let err: TuioError = io.into();
        match err {
            TuioError::Socket { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::WouldBlock);
            }
            other => panic!("expected Socket error, got {other:?}"),
        }
    }
}
