//! Recorded cursor sessions.
//!
//! A [`Recording`] captures a sequence of complete bundles plus the rate the
//! source emitted them at. Recordings are stored as YAML so fixtures can be
//! written by hand, and are played back through
//! [`ReplaySource`](crate::sources::ReplaySource), which re-emits each
//! bundle's alive/set/fseq messages through the same decode path live
//! traffic takes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::CursorPoint;
use crate::{Result, TuioError};

/// One captured bundle: the frame sequence number and its touch points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedBundle {
    /// Frame sequence number the source sent in `fseq`
    pub frame: i32,

    /// Touch points in the order their `set` messages arrived
    #[serde(default)]
    pub cursors: Vec<CursorPoint>,
}

/// A recorded cursor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Bundle rate of the original source, in Hz
    pub rate_hz: f64,

    /// Captured bundles in transmission order
    pub bundles: Vec<RecordedBundle>,
}

impl Recording {
    /// Create a recording, validating the rate.
    pub fn new(rate_hz: f64, bundles: Vec<RecordedBundle>) -> Result<Self> {
        let recording = Self { rate_hz, bundles };
        recording.validate()?;
        Ok(recording)
    }

    /// Parse a recording from YAML text.
    pub fn parse(yaml: &str) -> Result<Self> {
        let recording: Recording = serde_yaml_ng::from_str(yaml).map_err(|err| {
            TuioError::recording_with_source("failed to parse recording YAML", Box::new(err))
        })?;
        recording.validate()?;
        Ok(recording)
    }

    /// Load a recording from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            TuioError::recording_with_source(
                format!("failed to read recording file {}", path.display()),
                Box::new(err),
            )
        })?;
        Self::parse(&text)
    }

    /// Serialize to YAML text.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|err| {
            TuioError::recording_with_source("failed to serialize recording", Box::new(err))
        })
    }

    /// Number of captured bundles.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// True when the recording holds no bundles.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Playback duration at normal speed, in seconds.
    pub fn duration(&self) -> f64 {
        self.bundles.len() as f64 / self.rate_hz
    }

    fn validate(&self) -> Result<()> {
        if !self.rate_hz.is_finite() || self.rate_hz <= 0.0 {
            return Err(TuioError::recording(format!(
                "rate_hz must be finite and positive, got {}",
                self.rate_hz
            )));
        }
        Ok(())
    }
}

impl RecordedBundle {
    /// Convenience constructor for a bundle out of plain points.
    pub fn new(frame: i32, cursors: Vec<CursorPoint>) -> Self {
        Self { frame, cursors }
    }
}
