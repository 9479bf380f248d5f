//! Blast-radius collision detection
//!
//! Every collision in the game is a point against an explosion disc: a point
//! is caught when the blast radius strictly exceeds its distance from the
//! blast center.

use glam::Vec2;

use super::missile::Missile;
use crate::distance;

/// An active explosion disc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blast {
    pub center: Vec2,
    pub radius: f32,
}

impl Blast {
    /// The blast of an exploding missile, if it is exploding
    pub fn of(missile: &Missile) -> Option<Blast> {
        missile.is_exploding().then_some(Blast {
            center: missile.position(),
            radius: missile.radius,
        })
    }

    /// Is `point` inside the blast
    pub fn catches(&self, point: Vec2) -> bool {
        self.radius > distance(point, self.center)
    }
}

/// Is `point` inside any of `blasts`
pub fn caught_by_any(point: Vec2, blasts: &[Blast]) -> bool {
    blasts.iter().any(|blast| blast.catches(point))
}

/// Collect the blasts of all exploding missiles, in pool order
pub fn active_blasts<'a>(missiles: impl IntoIterator<Item = &'a Missile>) -> Vec<Blast> {
    missiles.into_iter().filter_map(Blast::of).collect()
}
