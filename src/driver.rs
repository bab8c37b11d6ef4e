//! Driver spawns and manages the decode task

use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::decoder::BundleDecoder;
use crate::source::MessageSource;
use crate::types::CursorFrame;

/// Result of spawning the driver task
pub struct DriverChannels {
    /// Receiver for published cursor frames
    pub frames: watch::Receiver<Option<Arc<CursorFrame>>>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
}

/// Driver spawns the task that owns the source and the decoder.
///
/// The task pulls messages, feeds the decoder, and publishes each completed
/// frame into a watch channel. The watch channel is the atomic snapshot
/// swap: readers only ever observe whole `Arc<CursorFrame>` values, never a
/// bundle under construction.
pub struct Driver;

impl Driver {
    /// Spawn the decode task for the given source.
    ///
    /// Returns a watch receiver for frames plus a cancellation token for
    /// graceful shutdown. The channel starts at `None` until the first
    /// bundle completes.
    pub fn spawn<S>(source: S, decoder: BundleDecoder) -> DriverChannels
    where
        S: MessageSource,
    {
        let (frame_tx, frame_rx) = watch::channel(None);
        let cancel = CancellationToken::new();
        let cancel_pump = cancel.clone();

        tokio::spawn(async move {
            Self::pump_task(source, decoder, frame_tx, cancel_pump).await;
        });

        DriverChannels { frames: frame_rx, cancel }
    }

    /// Message pump - reads messages, decodes bundles, publishes frames
    async fn pump_task<S>(
        mut source: S,
        mut decoder: BundleDecoder,
        frame_tx: watch::Sender<Option<Arc<CursorFrame>>>,
        cancel: CancellationToken,
    ) where
        S: MessageSource,
    {
        info!(source = %source.describe(), "message pump started");
        let mut message_count = 0u64;
        let mut frame_count = 0u64;
        let mut error_count = 0u32;
        const MAX_ERRORS: u32 = 10;

        loop {
            // Use select to allow cancellation during the source read
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("message pump cancelled");
                    break;
                }
                result = source.next_message() => result,
            };

            match result {
                Ok(Some(message)) => {
                    message_count += 1;
                    error_count = 0;

                    if let Some(frame) = decoder.handle(message) {
                        frame_count += 1;
                        trace!(
                            frame = frame.frame,
                            cursors = frame.len(),
                            "publishing cursor frame"
                        );

                        if frame_tx.send(Some(Arc::new(frame))).is_err() {
                            debug!("all frame receivers dropped, shutting down");
                            break;
                        }
                    }
                }
                Ok(None) => {
                    // Dropping the sender ends subscriber streams; the last
                    // published frame stays readable as the final state.
                    info!(frames = frame_count, "source ended");
                    break;
                }
                Err(e) => {
                    // Source error - don't tear down the listener on
                    // transient faults, since that would silently stop all
                    // snapshot updates.
                    error_count += 1;
                    error!(
                        error = %e,
                        attempt = error_count,
                        max = MAX_ERRORS,
                        "source error"
                    );

                    if !e.is_retryable() || error_count >= MAX_ERRORS {
                        error!("giving up on source, shutting down");
                        break;
                    }

                    // Exponential backoff: 50ms, 100ms, 200ms, ...
                    let backoff = std::time::Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        info!(
            messages = message_count,
            frames = frame_count,
            "message pump ended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrphanSetPolicy;
    use crate::types::{CursorMessage, CursorPoint};
    use crate::{Result, TuioError};

    /// Source that plays a fixed message script, then ends.
    struct ScriptSource {
        script: std::vec::IntoIter<Result<CursorMessage>>,
    }

    impl ScriptSource {
        fn new(script: Vec<Result<CursorMessage>>) -> Self {
            Self { script: script.into_iter() }
        }
    }

    #[async_trait::async_trait]
    impl MessageSource for ScriptSource {
        async fn next_message(&mut self) -> Result<Option<CursorMessage>> {
            match self.script.next() {
                Some(Ok(msg)) => Ok(Some(msg)),
                Some(Err(e)) => Err(e),
                None => Ok(None),
            }
        }

        fn describe(&self) -> String {
            "scripted source".to_string()
        }
    }

    fn bundle(frame: i32, ids: &[i32]) -> Vec<Result<CursorMessage>> {
        let mut msgs = vec![Ok(CursorMessage::Alive { session_ids: ids.to_vec() })];
        msgs.extend(ids.iter().map(|&id| Ok(CursorMessage::Set(CursorPoint::at(id, 0.5, 0.5)))));
        msgs.push(Ok(CursorMessage::Fseq { frame }));
        msgs
    }

    #[tokio::test]
    async fn publishes_completed_frames_and_keeps_the_last() {
        let mut script = bundle(1, &[10]);
        script.extend(bundle(2, &[10, 11]));
        let channels = Driver::spawn(
            ScriptSource::new(script),
            BundleDecoder::new(10, OrphanSetPolicy::Ignore),
        );

        let mut rx = channels.frames;
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            if let Some(frame) = rx.borrow_and_update().clone() {
                seen.push(frame);
            }
        }

        // The watch channel keeps only the latest value, so a slow reader may
        // observe a subset, but the final frame survives end-of-stream.
        let last = seen.last().expect("at least one frame observed");
        assert_eq!(last.frame, 2);
        assert_eq!(last.len(), 2);
        assert_eq!(rx.borrow().as_ref().unwrap().frame, 2);
    }

    #[tokio::test]
    async fn nonretryable_error_ends_the_stream() {
        let script = vec![
            Ok(CursorMessage::Alive { session_ids: vec![] }),
            Err(TuioError::config("broken")),
        ];
        let channels = Driver::spawn(
            ScriptSource::new(script),
            BundleDecoder::new(10, OrphanSetPolicy::Ignore),
        );

        let mut rx = channels.frames;
        // The pump should terminate promptly, dropping its sender
        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while rx.changed().await.is_ok() {}
        })
        .await
        .expect("pump should shut down on a fatal error");
    }

    #[tokio::test]
    async fn cancellation_stops_the_pump() {
        // A source that never produces: the pump blocks in next_message
        struct PendingSource;

        #[async_trait::async_trait]
        impl MessageSource for PendingSource {
            async fn next_message(&mut self) -> Result<Option<CursorMessage>> {
                futures::future::pending().await
            }

            fn describe(&self) -> String {
                "pending source".to_string()
            }
        }

        let channels = Driver::spawn(
            PendingSource,
            BundleDecoder::new(10, OrphanSetPolicy::Ignore),
        );
        channels.cancel.cancel();

        let mut rx = channels.frames;
        // Sender drops once the pump exits, surfacing as a channel error
        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while rx.changed().await.is_ok() {}
        })
        .await
        .expect("pump should exit after cancellation");
    }
}
