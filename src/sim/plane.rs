//! Plane state machine
//!
//! The plane crosses the screen once per cycle at a fixed height, fires its
//! single missile when it passes a randomly chosen x, then rests before the
//! next pass. Cycle: `Init -> Move -> Dead -> Init`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::missile::Missile;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::renderer::{Canvas, shapes};
use crate::{lerp_point, secs_to_ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneState {
    Init,
    Move,
    Dead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    pub state: PlaneState,
    pub origin: Vec2,
    pub destination: Vec2,
    pub current: Vec2,
    pub length: f32,
    pub total_length: f32,
    /// Caught in an explosion
    pub exploded: bool,
    /// x at which the plane fires its missile this pass
    pub launch_x: f32,
    pub has_launched: bool,
    /// Ticks spent in `Dead`
    pub dead_ticks: u32,
    /// Ticks to rest before the next pass
    pub cooldown_ticks: u32,
}

impl Default for Plane {
    fn default() -> Self {
        Self::new()
    }
}

impl Plane {
    pub fn new() -> Self {
        let origin = Vec2::new(0.0, PLANE_Y);
        let destination = Vec2::new(SCREEN_WIDTH, PLANE_Y);
        Self {
            state: PlaneState::Init,
            origin,
            destination,
            current: origin,
            length: 0.0,
            total_length: origin.distance(destination),
            exploded: false,
            launch_x: 0.0,
            has_launched: false,
            dead_ticks: 0,
            cooldown_ticks: secs_to_ticks(PLANE_COOLDOWN_SECS),
        }
    }

    /// Reset to the start of a pass and claim `missile` as the plane's slot
    pub fn init(&mut self, missile: &mut Missile) {
        *self = Self::new();
        missile.init_dead();
    }

    /// Mark the plane as hit; handled on its next tick
    pub fn explode(&mut self) {
        self.exploded = true;
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    /// The plane only exists on screen while moving
    pub fn is_flying(&self) -> bool {
        self.state == PlaneState::Move
    }

    pub fn travel_ratio(&self) -> f32 {
        self.length / self.total_length
    }

    /// Has the plane reached or passed `launch_x` in its direction of travel
    fn passed_launch_x(&self) -> bool {
        let direction = (self.destination.x - self.origin.x).signum();
        (self.current.x - self.launch_x) * direction >= 0.0
    }

    /// Advance one tick. `missile` is the plane's dedicated pool slot.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        missile: &mut Missile,
        canvas: &mut dyn Canvas,
        audio: &mut dyn AudioSink,
        rng: &mut R,
    ) {
        let previous = self.state;

        self.state = match self.state {
            PlaneState::Init => {
                self.launch_x = rng.random_range(0..SCREEN_WIDTH as u32) as f32;
                log::trace!("plane will fire at x={}", self.launch_x);
                audio.play(SoundEffect::PlaneAppear);
                PlaneState::Move
            }
            PlaneState::Move => {
                if self.exploded || self.travel_ratio() > PLANE_OVERRUN {
                    shapes::plane(canvas, self.current, true);
                    PlaneState::Dead
                } else {
                    if self.passed_launch_x() && !self.has_launched {
                        missile.init_plane(self.current, rng);
                        self.has_launched = true;
                        log::debug!("plane fired missile from {}", self.current);
                    }
                    PlaneState::Move
                }
            }
            PlaneState::Dead => {
                if self.dead_ticks >= self.cooldown_ticks {
                    self.dead_ticks = 0;
                    self.length = 0.0;
                    self.current = self.origin;
                    self.exploded = false;
                    self.has_launched = false;
                    PlaneState::Init
                } else {
                    PlaneState::Dead
                }
            }
        };

        if self.state != previous {
            log::trace!("plane {:?} -> {:?}", previous, self.state);
        }

        match self.state {
            PlaneState::Init => {}
            PlaneState::Move => {
                shapes::plane(canvas, self.current, true);
                self.length += PLANE_DISTANCE_PER_TICK;
                self.current = lerp_point(self.origin, self.destination, self.travel_ratio());
                shapes::plane(canvas, self.current, false);
            }
            PlaneState::Dead => {
                self.dead_ticks += 1;
            }
        }
    }
}
