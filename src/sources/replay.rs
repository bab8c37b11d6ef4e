//! Replay source for recorded cursor sessions

use std::collections::VecDeque;

use tokio::time::{Duration, Interval, interval};
use tracing::{debug, info, trace};

use crate::recording::{RecordedBundle, Recording};
use crate::source::MessageSource;
use crate::types::CursorMessage;
use crate::{Result, TuioError};

/// Replay source that plays back a [`Recording`].
///
/// Each recorded bundle is expanded into the alive/set/fseq messages the
/// original source would have sent, so playback exercises exactly the same
/// decode path as live traffic. Bundles are paced by a tokio interval at
/// the recording's rate; the messages within a bundle are delivered
/// back-to-back, as they would arrive in a single datagram.
pub struct ReplaySource {
    bundles: Vec<RecordedBundle>,

    /// Index of the next bundle to play
    position: usize,

    /// Playback speed multiplier (1.0 = recorded rate)
    speed: f64,

    /// Bundle pacing interval
    interval: Interval,

    /// Recorded bundle rate
    rate_hz: f64,

    /// Messages of the current bundle, not yet handed out
    queue: VecDeque<CursorMessage>,
}

impl ReplaySource {
    /// Create a replay source over a recording.
    ///
    /// The rate is re-checked here because `Recording` has public fields and
    /// may not have gone through its validating constructor.
    pub fn new(recording: Recording) -> Result<Self> {
        let rate_hz = recording.rate_hz;
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return Err(TuioError::recording(format!(
                "cannot replay at rate {rate_hz}Hz"
            )));
        }
        info!(bundles = recording.len(), rate_hz, "starting cursor replay");

        Ok(Self {
            bundles: recording.bundles,
            position: 0,
            speed: 1.0,
            interval: interval(Duration::from_secs_f64(1.0 / rate_hz)),
            rate_hz,
            queue: VecDeque::new(),
        })
    }

    /// Set playback speed.
    ///
    /// Clamped to 0.1-10.0x of the recorded rate.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.1, 10.0);
        self.interval = interval(Duration::from_secs_f64(1.0 / (self.rate_hz * self.speed)));
        debug!(speed = self.speed, "playback speed changed");
    }

    /// Recorded bundle rate in Hz.
    pub fn rate_hz(&self) -> f64 {
        self.rate_hz
    }

    fn enqueue_bundle(&mut self, index: usize) {
        let bundle = &self.bundles[index];
        trace!(frame = bundle.frame, cursors = bundle.cursors.len(), "replaying bundle");

        self.queue.push_back(CursorMessage::Alive {
            session_ids: bundle.cursors.iter().map(|c| c.session_id).collect(),
        });
        for cursor in &bundle.cursors {
            self.queue.push_back(CursorMessage::Set(*cursor));
        }
        self.queue.push_back(CursorMessage::Fseq { frame: bundle.frame });
    }
}

#[async_trait::async_trait]
impl MessageSource for ReplaySource {
    async fn next_message(&mut self) -> Result<Option<CursorMessage>> {
        if let Some(msg) = self.queue.pop_front() {
            return Ok(Some(msg));
        }

        if self.position >= self.bundles.len() {
            debug!("reached end of recording");
            return Ok(None);
        }

        // Pace bundle boundaries; messages within a bundle go out together
        self.interval.tick().await;

        let index = self.position;
        self.position += 1;
        self.enqueue_bundle(index);

        Ok(self.queue.pop_front())
    }

    fn describe(&self) -> String {
        format!("replay of {} bundles at {}Hz", self.bundles.len(), self.rate_hz)
    }
}
