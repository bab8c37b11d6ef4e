//! Latest-wins cadence control for snapshot streams

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Extension trait to pace any stream to a fixed cadence
pub trait CadenceExt: Stream {
    /// Emit at most one item per `period`, always the freshest.
    ///
    /// Items that arrive between ticks overwrite each other; a renderer
    /// polling at 60Hz sees the latest snapshot once per display frame and
    /// never a backlog of stale ones. A tick with nothing new emits
    /// nothing - the stream stays pending until the source produces again,
    /// and only ends once the source ends.
    fn latest_every(self, period: Duration) -> Cadence<Self>
    where
        Self: Sized,
    {
        Cadence::new(self, period)
    }
}

impl<T: Stream> CadenceExt for T {}

pin_project! {
    /// Stream combinator that emits the latest item once per tick
    pub struct Cadence<S: Stream> {
        #[pin]
        inner: S,
        ticker: Interval,
        latest: Option<S::Item>,
        done: bool,
    }
}

impl<S: Stream> Cadence<S> {
    /// Create a paced stream over `inner`.
    pub fn new(inner: S, period: Duration) -> Self {
        let mut ticker = interval(period);
        // A stalled consumer must not be repaid with a burst of ticks
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { inner, ticker, latest: None, done: false }
    }
}

impl<S: Stream> Stream for Cadence<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(this.latest.take());
        }

        ready!(this.ticker.poll_tick(cx));

        // Drain whatever accumulated since the last tick, keeping the newest
        loop {
            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => *this.latest = Some(item),
                Poll::Ready(None) => {
                    *this.done = true;
                    return Poll::Ready(this.latest.take());
                }
                Poll::Pending => {
                    // Nothing new this period. Emit the held item if there
                    // is one; otherwise stay pending - the inner stream's
                    // waker is registered and will reschedule us.
                    return match this.latest.take() {
                        Some(item) => Poll::Ready(Some(item)),
                        None => Poll::Pending,
                    };
                }
            }
        }
    }
}
