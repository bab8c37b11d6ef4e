//! Touch point representation

use serde::{Deserialize, Serialize};

/// One active touch contact as reported by a TUIO `set` message.
///
/// Coordinates are normalized to `[0, 1]` with the origin at the top-left
/// of the sensor surface. Velocities are in surface widths/heights per
/// second; `motion_acceleration` is the scalar acceleration of the contact.
///
/// A `CursorPoint` is immutable once constructed. The decoder never updates
/// points in place; each bundle carries a fresh set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorPoint {
    /// Persistent identifier for this contact across frames
    pub session_id: i32,

    /// Normalized horizontal position
    pub x: f32,

    /// Normalized vertical position
    pub y: f32,

    /// Horizontal velocity component
    pub x_velocity: f32,

    /// Vertical velocity component
    pub y_velocity: f32,

    /// Scalar motion acceleration
    pub motion_acceleration: f32,
}

impl CursorPoint {
    /// Create a stationary cursor at the given position.
    ///
    /// Velocity and acceleration are zeroed. Mostly useful for building
    /// recordings and test fixtures.
    pub fn at(session_id: i32, x: f32, y: f32) -> Self {
        Self { session_id, x, y, x_velocity: 0.0, y_velocity: 0.0, motion_acceleration: 0.0 }
    }
}
