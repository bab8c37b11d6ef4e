//! Replay connection over a recorded session

use std::sync::Arc;

use futures::Stream;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::TuioConfig;
use crate::decoder::BundleDecoder;
use crate::driver::Driver;
use crate::recording::Recording;
use crate::sources::ReplaySource;
use crate::types::{CursorFrame, UpdateRate};
use crate::Result;

/// Replay connection playing back a [`Recording`].
///
/// Behaves like a live connection fed by the recorded source: playback goes
/// through the same decoder and publication path, paced at the recording's
/// rate.
pub struct ReplayConnection {
    /// Frame watch receiver
    frames: watch::Receiver<Option<Arc<CursorFrame>>>,

    /// Recorded bundle rate
    rate_hz: f64,

    /// Cancellation token for stopping the driver task
    cancel: CancellationToken,
}

impl ReplayConnection {
    /// Start playback at the recorded rate.
    ///
    /// Waits for the first frame (bounded by a 5 second timeout) so
    /// subscribers attached right after this returns never race playback
    /// start.
    pub async fn start(recording: Recording, config: TuioConfig) -> Result<Self> {
        Self::start_with_speed(recording, config, 1.0).await
    }

    /// Start playback at a speed multiple of the recorded rate.
    pub async fn start_with_speed(
        recording: Recording,
        config: TuioConfig,
        speed: f64,
    ) -> Result<Self> {
        config.validate()?;

        let mut source = ReplaySource::new(recording)?;
        if speed != 1.0 {
            source.set_speed(speed);
        }
        let rate_hz = source.rate_hz();

        let decoder = BundleDecoder::new(config.max_cursors, config.orphan_set_policy);
        let channels = Driver::spawn(source, decoder);

        // Wait for the first frame to be available
        let mut frame_rx = channels.frames.clone();
        let timeout = std::time::Duration::from_secs(5);
        let wait_result = tokio::time::timeout(timeout, async {
            loop {
                if frame_rx.borrow_and_update().is_some() {
                    break;
                }
                if frame_rx.changed().await.is_err() {
                    // Playback ended without publishing (empty recording)
                    break;
                }
            }
        })
        .await;

        if wait_result.is_err() {
            warn!("timeout waiting for first replayed frame");
        }

        info!(rate_hz, "replay connection started");

        Ok(Self { frames: channels.frames, rate_hz, cancel: channels.cancel })
    }

    /// Subscribe to published cursor frames.
    pub fn subscribe(&self, rate: UpdateRate) -> impl Stream<Item = Arc<CursorFrame>> + 'static {
        super::subscribe_frames(self.frames.clone(), rate)
    }

    /// Latest published frame, if any bundle has completed yet.
    pub fn current(&self) -> Option<Arc<CursorFrame>> {
        self.frames.borrow().clone()
    }

    /// Recorded bundle rate in Hz.
    pub fn rate_hz(&self) -> f64 {
        self.rate_hz
    }
}

impl Drop for ReplayConnection {
    fn drop(&mut self) {
        debug!("dropping replay connection");
        self.cancel.cancel();
    }
}
