//! Runtime configuration for TUIO connections

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::{Result, TuioError};

/// Default UDP port assigned to TUIO sources.
pub const DEFAULT_TUIO_PORT: u16 = 3333;

/// OSC address of the TUIO 1.1 2D cursor profile.
pub const CURSOR_PROFILE: &str = "/tuio/2Dcur";

/// Default maximum number of simultaneous touch points in a snapshot.
pub const DEFAULT_MAX_CURSORS: usize = 10;

/// Policy for a `set` message that arrives with no bundle in progress.
///
/// The TUIO cursor profile does not define this case; a conforming source
/// always opens a bundle with `alive`. See [`TuioConfig::orphan_set_policy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanSetPolicy {
    /// Drop the message; the last published snapshot stays intact (default).
    #[default]
    Ignore,

    /// Lazily start a bundle containing just this point.
    StartBundle,
}

/// Configuration for a TUIO connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuioConfig {
    /// Address the UDP listener binds to
    pub bind_addr: SocketAddr,

    /// OSC address the cursor messages are expected on
    pub profile: String,

    /// Maximum touch points retained per snapshot; excess `set` messages in
    /// a bundle are dropped deterministically, preserving arrival order
    pub max_cursors: usize,

    /// What to do with a `set` seen before any `alive`
    pub orphan_set_policy: OrphanSetPolicy,
}

impl Default for TuioConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_TUIO_PORT)),
            profile: CURSOR_PROFILE.to_string(),
            max_cursors: DEFAULT_MAX_CURSORS,
            orphan_set_policy: OrphanSetPolicy::default(),
        }
    }
}

impl TuioConfig {
    /// Validate the configuration before use.
    pub fn validate(&self) -> Result<()> {
        if self.max_cursors == 0 {
            return Err(TuioError::config("max_cursors must be at least 1"));
        }
        if self.profile.is_empty() || !self.profile.starts_with('/') {
            return Err(TuioError::config(format!(
                "profile must be an OSC address starting with '/', got {:?}",
                self.profile
            )));
        }
        Ok(())
    }
}
