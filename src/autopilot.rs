//! Demo player
//!
//! Plays the game headlessly by producing the finger samples a person would:
//! press on a target, hold briefly, lift, wait, repeat. It only reads the
//! game state; its presses go through the touchscreen like any other input.

use glam::Vec2;

use crate::consts::*;
use crate::sim::GameState;

/// Flying enemies lower than this are considered a threat
const DANGER_Y: f32 = SCREEN_HEIGHT * 0.5;
/// Aim this many pixels ahead of a falling missile
const ENEMY_LEAD: f32 = 16.0;
/// Aim this many pixels ahead of the plane
const PLANE_LEAD: f32 = 30.0;
/// A player missile already heading within this distance covers a target
const COVER_RADIUS: f32 = EXPLOSION_MAX_RADIUS * 0.8;

/// Autopilot pacing, in touch samples
#[derive(Debug, Clone)]
pub struct Autopilot {
    hold_samples: u32,
    cooldown_samples: u32,
    pressing: Option<Vec2>,
    held: u32,
    cooldown: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(3, 20)
    }
}

impl Autopilot {
    pub fn new(hold_samples: u32, cooldown_samples: u32) -> Self {
        Self {
            hold_samples: hold_samples.max(1),
            cooldown_samples,
            pressing: None,
            held: 0,
            cooldown: 0,
        }
    }

    /// Finger position for the next touch sample, `None` when lifted
    pub fn sample(&mut self, state: &GameState) -> Option<Vec2> {
        if let Some(point) = self.pressing {
            if self.held < self.hold_samples {
                self.held += 1;
                return Some(point);
            }
            self.pressing = None;
            self.cooldown = self.cooldown_samples;
            return None;
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }

        let point = target(state)?;
        log::trace!("autopilot tapping {}", point);
        self.pressing = Some(point);
        self.held = 1;
        Some(point)
    }
}

/// Is some player missile already on its way to `point`
fn covered(state: &GameState, point: Vec2) -> bool {
    state
        .missiles
        .player
        .iter()
        .filter(|m| !m.is_dead())
        .any(|m| m.destination.distance(point) < COVER_RADIUS)
}

/// Where the autopilot would tap right now
pub fn target(state: &GameState) -> Option<Vec2> {
    // Most dangerous enemy: the lowest flying one nobody is shooting at
    let threat = state
        .missiles
        .enemy
        .iter()
        .filter(|m| m.is_flying() && !m.explode_requested)
        .map(|m| {
            let heading = (m.destination - m.origin).normalize_or_zero();
            m.position() + heading * ENEMY_LEAD
        })
        .filter(|&point| !covered(state, point))
        .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));

    let in_danger = threat.is_some_and(|point| point.y > DANGER_Y);
    if !in_danger {
        // Safe for now, go for a bonus
        if state.powerup.is_collidable() && !covered(state, state.powerup.position()) {
            return Some(state.powerup.position());
        }
        if state.plane.is_flying() {
            let ahead = state.plane.position() + Vec2::new(PLANE_LEAD, 0.0);
            if ahead.x < SCREEN_WIDTH && !covered(state, ahead) {
                return Some(ahead);
            }
        }
    }

    threat
}
