//! Async TUIO 2D-cursor decoder for multitouch surfaces.
//!
//! `tuio-stream` listens for TUIO-over-OSC cursor traffic on UDP, reassembles
//! the alive/set/fseq message sequences into complete bundles, and republishes
//! each bundle as an atomic snapshot of the currently active touch points.
//! Consumers read snapshots either through a cheap accessor or as an async
//! stream paced to their own cadence - a renderer typically subscribes at
//! 60Hz and always sees the freshest complete frame, never a bundle under
//! construction.
//!
//! # Features
//!
//! - **Live traffic**: UDP listener for the TUIO 1.1 2D cursor profile
//! - **Replay**: recorded sessions played back through the same decode path
//! - **Atomic snapshots**: frames swap wholesale; no torn reads, no mixing
//!   of two bundles
//! - **Fault tolerance**: garbage datagrams and malformed messages are
//!   logged and dropped without stopping the listener
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use tuio_stream::{Tuio, TuioConfig, UpdateRate};
//!
//! #[tokio::main]
//! async fn main() -> tuio_stream::Result<()> {
//!     let connection = Tuio::bind(TuioConfig::default()).await?;
//!     let mut frames = connection.subscribe(UpdateRate::Max(60));
//!
//!     while let Some(frame) = frames.next().await {
//!         println!("{} active touches", frame.len());
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod config;
mod error;
pub mod types;

// Decode pipeline
pub mod decoder;
pub mod osc;

// Stream-based architecture
pub mod connection;
pub mod driver;
pub mod source;
pub mod sources;
pub mod stream;

// Recorded sessions
pub mod recording;

// Core exports
pub use config::{
    CURSOR_PROFILE, DEFAULT_MAX_CURSORS, DEFAULT_TUIO_PORT, OrphanSetPolicy, TuioConfig,
};
pub use error::{Result, TuioError};
pub use types::{CursorFrame, CursorMessage, CursorPoint, UpdateRate};

// Decode pipeline exports
pub use decoder::BundleDecoder;

// Recording exports
pub use recording::{RecordedBundle, Recording};

// Main API exports
pub use connection::live::LiveConnection;
pub use connection::replay::ReplayConnection;

/// Unified entry point for TUIO cursor connections.
///
/// The factory provides a consistent API for consuming live traffic and
/// recorded sessions.
///
/// # Examples
///
/// ## Live traffic
/// ```rust,no_run
/// use tuio_stream::{Tuio, TuioConfig};
///
/// #[tokio::main]
/// async fn main() -> tuio_stream::Result<()> {
///     let connection = Tuio::bind(TuioConfig::default()).await?;
///     // Use connection...
///     Ok(())
/// }
/// ```
///
/// ## Recorded session
/// ```rust,no_run
/// use tuio_stream::{Recording, Tuio, TuioConfig};
///
/// #[tokio::main]
/// async fn main() -> tuio_stream::Result<()> {
///     let recording = Recording::load("session.yaml")?;
///     let connection = Tuio::replay(recording, TuioConfig::default()).await?;
///     // Use connection...
///     Ok(())
/// }
/// ```
pub struct Tuio;

impl Tuio {
    /// Bind a UDP listener for live cursor traffic.
    ///
    /// Binds the configured address (TUIO's assigned port 3333 by default)
    /// and starts decoding immediately. Binding succeeds even while no
    /// source is transmitting.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the socket
    /// cannot be bound.
    pub async fn bind(config: TuioConfig) -> Result<LiveConnection> {
        LiveConnection::bind(config).await
    }

    /// Play back a recorded session.
    ///
    /// The recording is replayed at its captured rate through the same
    /// decode path live traffic takes, so subscribers behave identically.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub async fn replay(recording: Recording, config: TuioConfig) -> Result<ReplayConnection> {
        ReplayConnection::start(recording, config).await
    }
}
