//! Game state and core simulation types
//!
//! `GameState` is the whole world: the missile pool, the plane, the powerup,
//! the counters and the RNG. Only the orchestrator mutates it.

use std::iter;
use std::ops::Range;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::missile::Missile;
use super::plane::Plane;
use super::powerup::Powerup;
use crate::consts::*;

/// Enemy slots advanced on alternating orchestrator ticks
pub const ENEMY_FIRST_HALF: Range<usize> = 0..3;
pub const ENEMY_SECOND_HALF: Range<usize> = 3..MAX_ENEMY_MISSILES;
/// Player slots advanced on alternating orchestrator ticks.
/// The plane's missile is advanced together with the second half.
pub const PLAYER_FIRST_HALF: Range<usize> = 0..2;
pub const PLAYER_SECOND_HALF: Range<usize> = 2..MAX_PLAYER_MISSILES;

/// How the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The plane was shot down
    Victory,
    /// Too many missiles reached the ground
    Defeat,
}

/// Fixed-capacity missile storage, partitioned by who launches into each slot
#[derive(Debug, Clone, Default, Serialize)]
pub struct MissilePool {
    pub enemy: [Missile; MAX_ENEMY_MISSILES],
    pub player: [Missile; MAX_PLAYER_MISSILES],
    /// The plane's single missile
    pub plane: Missile,
}

impl MissilePool {
    /// All slots dead
    pub fn new() -> Self {
        Self::default()
    }

    /// Every slot in pool order: enemy, player, plane
    pub fn iter(&self) -> impl Iterator<Item = &Missile> {
        self.enemy
            .iter()
            .chain(self.player.iter())
            .chain(iter::once(&self.plane))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Missile> {
        self.enemy
            .iter_mut()
            .chain(self.player.iter_mut())
            .chain(iter::once(&mut self.plane))
    }

    pub fn kill_all(&mut self) {
        self.iter_mut().for_each(Missile::init_dead);
    }

    /// Request detonation of every slot on its next tick
    pub fn trigger_all(&mut self) {
        self.iter_mut().for_each(Missile::trigger_explosion);
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub missiles: MissilePool,
    pub plane: Plane,
    pub powerup: Powerup,
    /// Player missiles launched
    pub shots_fired: u32,
    /// Enemy and plane missiles that reached the ground
    pub impact_count: u32,
    pub game_over: bool,
    pub outcome: Option<GameOutcome>,
    /// Which half of the pool the next tick advances
    pub first_half: bool,
    /// Orchestrator ticks run
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut missiles = MissilePool::new();
        let mut plane = Plane::new();
        plane.init(&mut missiles.plane);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            missiles,
            plane,
            powerup: Powerup::new(),
            shots_fired: 0,
            impact_count: 0,
            game_over: false,
            outcome: None,
            first_half: true,
            time_ticks: 0,
        }
    }

    /// True once the game has ended; never reverts
    pub fn game_status(&self) -> bool {
        self.game_over
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn did_you_win(&self) -> bool {
        self.outcome == Some(GameOutcome::Victory)
    }
}
