//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be deterministic:
//! - One call to `tick` per game-timer period
//! - Seeded RNG only
//! - Stable iteration order (pool order: enemy, player, plane)
//! - Drawing, input and audio only through the capability traits

pub mod collision;
pub mod missile;
pub mod plane;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{Blast, active_blasts, caught_by_any};
pub use missile::{Missile, MissileKind, MissileState, closest_launch_site};
pub use plane::{Plane, PlaneState};
pub use powerup::{Powerup, PowerupState};
pub use state::{GameOutcome, GameState, MissilePool};
pub use tick::{Peripherals, init, tick};
