//! Missile Command - a tick-driven missile defense arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (missiles, plane, powerup, collisions)
//! - `renderer`: Drawing capability the simulation paints through
//! - `audio`: Fire-and-forget sound cues
//! - `platform`: Touch input sampling and interval timers
//! - `autopilot`: Demo player that drives the touchscreen
//! - `settings`: Runner configuration

pub mod audio;
pub mod autopilot;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Display dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 240.0;

    /// Period of the game-tick timer (seconds)
    pub const GAME_TIMER_PERIOD: f32 = 45.0e-3;
    /// Period of the touchscreen sampling timer (seconds)
    pub const TOUCH_TIMER_PERIOD: f32 = 10.0e-3;

    /// Missile pool capacities
    pub const MAX_ENEMY_MISSILES: usize = 7;
    pub const MAX_PLAYER_MISSILES: usize = 4;
    pub const MAX_PLANE_MISSILES: usize = 1;
    pub const MAX_TOTAL_MISSILES: usize =
        MAX_ENEMY_MISSILES + MAX_PLAYER_MISSILES + MAX_PLANE_MISSILES;

    /// Base enemy missile travel per tick (plus the per-missile speed multiplier)
    pub const ENEMY_MISSILE_DISTANCE_PER_TICK: f32 = 0.5;
    /// Upper bound (exclusive) of the random enemy speed multiplier
    pub const ENEMY_SPEED_MAX: f32 = 1.5;
    pub const PLAYER_MISSILE_DISTANCE_PER_TICK: f32 = 3.0;
    pub const PLANE_MISSILE_DISTANCE_PER_TICK: f32 = ENEMY_MISSILE_DISTANCE_PER_TICK;

    /// Each missile is advanced on every other orchestrator tick, so travel
    /// and shrink rates are doubled and growth is tripled.
    pub const DOUBLE_TICK: f32 = 2.0;
    pub const TRIPLE_TICK: f32 = 3.0;

    pub const EXPLOSION_MAX_RADIUS: f32 = 25.0;
    pub const EXPLOSION_RADIUS_CHANGE_PER_TICK: f32 = 0.3;

    /// Player missile launch sites along the bottom row (x coordinates)
    pub const LAUNCH_SITE_ONE: f32 = 80.0;
    pub const LAUNCH_SITE_TWO: f32 = 160.0;
    pub const LAUNCH_SITE_THREE: f32 = 240.0;

    /// Impacts allowed before the game is lost
    pub const IMPACT_LIMIT: u32 = 30;

    /// Plane flight
    pub const PLANE_Y: f32 = 70.0;
    pub const PLANE_DISTANCE_PER_TICK: f32 = 2.0;
    /// Travel ratio past which the plane despawns (lets it leave the screen)
    pub const PLANE_OVERRUN: f32 = 1.25;
    pub const PLANE_COOLDOWN_SECS: f32 = 8.0;

    /// Powerup spawn region: x in [MIN_X, MIN_X + SPAN_X), y likewise
    pub const POWERUP_MIN_X: u32 = 5;
    pub const POWERUP_SPAN_X: u32 = 300;
    pub const POWERUP_MIN_Y: u32 = 30;
    pub const POWERUP_SPAN_Y: u32 = 100;
    pub const POWERUP_LIFETIME_SECS: f32 = 2.0;
    pub const POWERUP_COOLDOWN_SECS: f32 = 10.0;
    pub const POWERUP_REWARD_COOLDOWN_SECS: f32 = 15.0;
    /// Where a dead powerup is parked (off-screen)
    pub const POWERUP_PARKED_X: f32 = 400.0;
    pub const POWERUP_PARKED_Y: f32 = 400.0;

    /// Total game length for the runner
    pub const RUNTIME_SECS: f32 = 240.0;
}

/// Convert a real-time duration into a whole number of game ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs / consts::GAME_TIMER_PERIOD) as u32
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Linear interpolation between `from` and `to` by `ratio` (not clamped)
#[inline]
pub fn lerp_point(from: Vec2, to: Vec2, ratio: f32) -> Vec2 {
    from + (to - from) * ratio
}
