//! Platform abstraction layer
//!
//! Handles the hardware-facing collaborators of the simulation:
//! - Input: sampled touchscreen with an acknowledge handshake
//! - Time: interval timers and the coalescing game-tick flag

pub mod input;
pub mod time;

pub use input::{TouchController, TouchScreen, TouchStatus};
pub use time::{IntervalTimer, TickFlag};
