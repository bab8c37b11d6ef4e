//! Connection layer: public entry points for cursor streams.
//!
//! A connection owns the driver task for one source and hands out
//! subscriptions over its published frames. Both connection kinds expose the
//! same read surface: [`subscribe`](LiveConnection::subscribe) for an async
//! stream at a chosen [`UpdateRate`], and [`current`](LiveConnection::current)
//! for a cheap idempotent read of the latest snapshot.

pub mod live;
pub mod replay;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::stream::CadenceExt;
use crate::types::{CursorFrame, UpdateRate};

pub use live::LiveConnection;
pub use replay::ReplayConnection;

/// Build a subscriber stream over the driver's watch channel.
///
/// The watch channel only ever holds complete frames, so subscribers at any
/// rate observe atomic snapshots. `Native` passes every publication through;
/// `Max(hz)` applies latest-wins pacing.
fn subscribe_frames(
    rx: watch::Receiver<Option<Arc<CursorFrame>>>,
    rate: UpdateRate,
) -> BoxStream<'static, Arc<CursorFrame>> {
    let frames = WatchStream::new(rx).filter_map(|opt| async move { opt });

    match rate.throttle_interval() {
        None => frames.boxed(),
        Some(period) => frames.latest_every(period).boxed(),
    }
}
