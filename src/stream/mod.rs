//! Stream combinators for subscriber-side cadence control

mod throttle;

pub use throttle::{Cadence, CadenceExt};
