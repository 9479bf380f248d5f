//! Missile state machine
//!
//! Every missile slot cycles through `Init -> Move -> ExplodingGrow ->
//! ExplodingShrink -> Dead` and is relaunched by one of the `init_*`
//! constructors. Each tick runs two passes: the transition pass picks the
//! next state, then the action pass acts on that new state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::{BACKGROUND, Canvas, Color};
use crate::{distance, lerp_point};

/// Who launched the missile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissileKind {
    #[default]
    Enemy,
    Player,
    Plane,
}

impl MissileKind {
    /// Flight path and explosion color
    pub fn color(self) -> Color {
        match self {
            MissileKind::Enemy => Color::RED,
            MissileKind::Player => Color::GREEN,
            MissileKind::Plane => Color::WHITE,
        }
    }

    /// Distance covered per missile tick, compensated for staggered ticking
    pub fn distance_per_tick(self, speed: f32) -> f32 {
        let base = match self {
            MissileKind::Enemy => speed + ENEMY_MISSILE_DISTANCE_PER_TICK,
            MissileKind::Player => PLAYER_MISSILE_DISTANCE_PER_TICK,
            MissileKind::Plane => PLANE_MISSILE_DISTANCE_PER_TICK,
        };
        base * DOUBLE_TICK
    }

    /// Whether reaching the destination counts as an impact on the ground
    pub fn scores_impact(self) -> bool {
        matches!(self, MissileKind::Enemy | MissileKind::Plane)
    }
}

/// Missile lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissileState {
    /// Launched, not yet moving
    Init,
    /// In flight toward the destination
    Move,
    /// Blast radius growing
    ExplodingGrow,
    /// Blast radius shrinking
    ExplodingShrink,
    /// Free slot, no geometry
    #[default]
    Dead,
}

/// A missile slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Missile {
    pub kind: MissileKind,
    pub state: MissileState,
    pub origin: Vec2,
    pub destination: Vec2,
    pub current: Vec2,
    /// Distance from origin to destination
    pub total_length: f32,
    /// Distance traveled so far
    pub length: f32,
    /// Enemy-only speed multiplier, drawn once at launch
    pub speed: f32,
    /// Blast radius, zero unless exploding
    pub radius: f32,
    /// Detonate on the next tick
    pub explode_requested: bool,
    /// Reached the ground this tick; cleared by the orchestrator once counted
    pub impacted: bool,
}

/// Closest of the three launch sites to `x_dest`.
///
/// Sites are checked in the order three, two, one with `<=`, so on a tie
/// the lower-numbered site wins.
pub fn closest_launch_site(x_dest: f32) -> f32 {
    let mut difference = f32::INFINITY;
    let mut closest = LAUNCH_SITE_THREE;
    for site in [LAUNCH_SITE_THREE, LAUNCH_SITE_TWO, LAUNCH_SITE_ONE] {
        let d = (site - x_dest).abs();
        if d <= difference {
            difference = d;
            closest = site;
        }
    }
    closest
}

impl Missile {
    /// A dead slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the slot dead. Position is left as-is; the blast is cleared so
    /// a dead slot never collides.
    pub fn init_dead(&mut self) {
        self.state = MissileState::Dead;
        self.radius = 0.0;
    }

    /// Launch from the top quarter of the screen toward a random point on
    /// the bottom row, with a random speed multiplier
    pub fn init_enemy<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let origin = Vec2::new(
            rng.random_range(0..SCREEN_WIDTH as u32) as f32,
            rng.random_range(0..(SCREEN_HEIGHT / 4.0) as u32) as f32,
        );
        let destination = Vec2::new(rng.random_range(0..SCREEN_WIDTH as u32) as f32, SCREEN_HEIGHT);
        let speed = rng.random::<f32>() * ENEMY_SPEED_MAX;
        self.launch(MissileKind::Enemy, origin, destination, speed);
    }

    /// Launch from the closest launch site toward the touched point
    pub fn init_player(&mut self, destination: Vec2) {
        let origin = Vec2::new(closest_launch_site(destination.x), SCREEN_HEIGHT);
        self.launch(MissileKind::Player, origin, destination, 0.0);
    }

    /// Launch from the plane toward a random point on the bottom row
    pub fn init_plane<R: Rng + ?Sized>(&mut self, plane_pos: Vec2, rng: &mut R) {
        let destination = Vec2::new(rng.random_range(0..SCREEN_WIDTH as u32) as f32, SCREEN_HEIGHT);
        self.launch(MissileKind::Plane, plane_pos, destination, 0.0);
    }

    /// Common (re)initialization for every missile kind
    pub fn launch(&mut self, kind: MissileKind, origin: Vec2, destination: Vec2, speed: f32) {
        *self = Self {
            kind,
            state: MissileState::Init,
            origin,
            destination,
            current: origin,
            total_length: distance(origin, destination),
            length: 0.0,
            speed,
            radius: 0.0,
            explode_requested: false,
            impacted: false,
        };
    }

    pub fn is_dead(&self) -> bool {
        self.state == MissileState::Dead
    }

    pub fn is_flying(&self) -> bool {
        self.state == MissileState::Move
    }

    pub fn is_exploding(&self) -> bool {
        matches!(
            self.state,
            MissileState::ExplodingGrow | MissileState::ExplodingShrink
        )
    }

    /// Request detonation; consumed by the next tick while flying
    pub fn trigger_explosion(&mut self) {
        self.explode_requested = true;
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    /// Fraction of the path covered; 1.0 or more means arrived.
    /// A zero-length path counts as arrived.
    pub fn travel_ratio(&self) -> f32 {
        if self.total_length <= 0.0 {
            1.0
        } else {
            self.length / self.total_length
        }
    }

    fn draw_path(&self, canvas: &mut dyn Canvas, color: Color) {
        canvas.draw_line(self.origin, self.current, color);
    }

    fn draw_blast(&self, canvas: &mut dyn Canvas, color: Color) {
        canvas.fill_circle(self.current, self.radius, color);
    }

    /// Advance one missile tick
    pub fn tick(&mut self, canvas: &mut dyn Canvas) {
        let previous = self.state;

        self.state = match self.state {
            MissileState::Init => MissileState::Move,
            MissileState::Move => {
                if self.explode_requested {
                    self.explode_requested = false;
                    self.draw_path(canvas, BACKGROUND);
                    MissileState::ExplodingGrow
                } else if self.travel_ratio() >= 1.0 {
                    self.draw_path(canvas, BACKGROUND);
                    if self.kind.scores_impact() {
                        self.impacted = true;
                    }
                    MissileState::ExplodingGrow
                } else {
                    MissileState::Move
                }
            }
            MissileState::ExplodingGrow => {
                if self.radius >= EXPLOSION_MAX_RADIUS {
                    MissileState::ExplodingShrink
                } else {
                    MissileState::ExplodingGrow
                }
            }
            MissileState::ExplodingShrink => {
                if self.radius <= 0.0 {
                    self.draw_blast(canvas, BACKGROUND);
                    self.radius = 0.0;
                    MissileState::Dead
                } else {
                    MissileState::ExplodingShrink
                }
            }
            MissileState::Dead => MissileState::Dead,
        };

        if self.state != previous {
            log::trace!("{:?} missile {:?} -> {:?}", self.kind, previous, self.state);
        }

        match self.state {
            MissileState::Init | MissileState::Dead => {}
            MissileState::Move => {
                self.draw_path(canvas, BACKGROUND);
                self.length += self.kind.distance_per_tick(self.speed);
                self.current = lerp_point(self.origin, self.destination, self.travel_ratio());
                self.draw_path(canvas, self.kind.color());
            }
            MissileState::ExplodingGrow => {
                self.radius += EXPLOSION_RADIUS_CHANGE_PER_TICK * TRIPLE_TICK;
                self.draw_blast(canvas, self.kind.color());
            }
            MissileState::ExplodingShrink => {
                self.draw_blast(canvas, BACKGROUND);
                self.radius =
                    (self.radius - EXPLOSION_RADIUS_CHANGE_PER_TICK * DOUBLE_TICK).max(0.0);
                self.draw_blast(canvas, self.kind.color());
            }
        }
    }
}
