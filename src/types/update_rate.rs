//! Update rate control for snapshot streams

use serde::{Deserialize, Serialize};

/// Delivery cadence for a snapshot subscription.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpdateRate {
    /// One item per published bundle, as fast as the source sends them
    Native,

    /// Throttled to at most this many items per second, latest-wins.
    ///
    /// The typical choice for a renderer: `Max(60)` delivers the freshest
    /// snapshot once per display frame and silently drops the rest.
    Max(u32),
}

impl UpdateRate {
    /// Throttle interval for this rate, or `None` when no throttling applies.
    ///
    /// `Max(0)` is treated as `Native` rather than dividing by zero.
    pub fn throttle_interval(self) -> Option<std::time::Duration> {
        match self {
            UpdateRate::Native | UpdateRate::Max(0) => None,
            UpdateRate::Max(hz) => Some(std::time::Duration::from_secs_f64(1.0 / hz as f64)),
        }
    }
}
