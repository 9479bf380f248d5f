//! Touchscreen input
//!
//! The touch controller is sampled at the fast input rate. A completed touch
//! (press then lift) stays `Released` until the game acknowledges it, so a
//! tap can never be lost between two game ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Status of the pending touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TouchStatus {
    /// No finger on the screen and nothing pending
    #[default]
    Idle,
    /// Finger currently on the screen
    Pressed,
    /// A touch finished and has not been acknowledged yet
    Released,
}

/// What the game needs from the touchscreen
pub trait TouchScreen {
    fn status(&self) -> TouchStatus;
    /// Location of the last touch
    fn location(&self) -> Vec2;
    /// Consume a pending `Released` event
    fn ack_touch(&mut self);
}

/// Sampled touchscreen state machine
#[derive(Debug, Clone, Default)]
pub struct TouchController {
    status: TouchStatus,
    location: Vec2,
    samples: u64,
}

impl TouchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one input sample: `Some(point)` while a finger is down.
    /// Called from the touch timer, independently of game ticks.
    pub fn sample(&mut self, touch: Option<Vec2>) {
        self.samples += 1;
        self.status = match (self.status, touch) {
            (TouchStatus::Idle, Some(point)) => {
                self.location = point;
                TouchStatus::Pressed
            }
            (TouchStatus::Idle, None) => TouchStatus::Idle,
            (TouchStatus::Pressed, Some(point)) => {
                self.location = point;
                TouchStatus::Pressed
            }
            (TouchStatus::Pressed, None) => TouchStatus::Released,
            // Pending release blocks new touches until acknowledged
            (TouchStatus::Released, _) => TouchStatus::Released,
        };
    }

    /// Number of samples taken so far
    pub fn samples(&self) -> u64 {
        self.samples
    }
}

impl TouchScreen for TouchController {
    fn status(&self) -> TouchStatus {
        self.status
    }

    fn location(&self) -> Vec2 {
        self.location
    }

    fn ack_touch(&mut self) {
        if self.status == TouchStatus::Released {
            self.status = TouchStatus::Idle;
        }
    }
}
