//! Powerup state machine
//!
//! A bonus marker that appears at a random spot for a short time. Catching it
//! in an explosion plays the reward cue; the orchestrator applies the effect.
//! Cycle: `Init -> Move -> Dead -> Init`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::renderer::{Canvas, Color, shapes};
use crate::secs_to_ticks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupState {
    Init,
    Move,
    Dead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub state: PowerupState,
    pub current: Vec2,
    pub exploded: bool,
    /// Ticks spent visible this cycle
    pub move_ticks: u32,
    pub lifetime_ticks: u32,
    /// Ticks spent in `Dead`
    pub dead_ticks: u32,
    /// Ticks to stay dead; longer after a reward
    pub cooldown_ticks: u32,
    /// Fill colors of the two marker triangles
    pub colors: (Color, Color),
}

impl Default for Powerup {
    fn default() -> Self {
        Self::new()
    }
}

fn parked() -> Vec2 {
    Vec2::new(POWERUP_PARKED_X, POWERUP_PARKED_Y)
}

fn random_spawn<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(
        (rng.random_range(0..POWERUP_SPAN_X) + POWERUP_MIN_X) as f32,
        (rng.random_range(0..POWERUP_SPAN_Y) + POWERUP_MIN_Y) as f32,
    )
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    // Bright channels only, so never the background color
    Color::from_rgb(
        rng.random_range(64..=255),
        rng.random_range(64..=255),
        rng.random_range(64..=255),
    )
}

impl Powerup {
    pub fn new() -> Self {
        Self {
            state: PowerupState::Init,
            current: parked(),
            exploded: false,
            move_ticks: 0,
            lifetime_ticks: secs_to_ticks(POWERUP_LIFETIME_SECS),
            dead_ticks: 0,
            cooldown_ticks: secs_to_ticks(POWERUP_COOLDOWN_SECS),
            colors: (Color::YELLOW, Color::BLUE),
        }
    }

    /// Reset to `Init`; the spawn point is picked on the next tick
    pub fn init(&mut self) {
        *self = Self::new();
    }

    /// Mark the powerup as caught; handled on its next tick
    pub fn explode(&mut self) {
        self.exploded = true;
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    /// Visible and collidable only while moving
    pub fn is_collidable(&self) -> bool {
        self.state == PowerupState::Move
    }

    fn park(&mut self) {
        self.current = parked();
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        canvas: &mut dyn Canvas,
        audio: &mut dyn AudioSink,
        rng: &mut R,
    ) {
        let previous = self.state;

        self.state = match self.state {
            PowerupState::Init => {
                self.current = random_spawn(rng);
                PowerupState::Move
            }
            PowerupState::Move => {
                if self.exploded {
                    shapes::erase_powerup(canvas, self.current);
                    audio.play(SoundEffect::PowerUp);
                    self.cooldown_ticks = secs_to_ticks(POWERUP_REWARD_COOLDOWN_SECS);
                    self.park();
                    PowerupState::Dead
                } else if self.move_ticks > self.lifetime_ticks {
                    shapes::erase_powerup(canvas, self.current);
                    self.park();
                    PowerupState::Dead
                } else {
                    PowerupState::Move
                }
            }
            PowerupState::Dead => {
                if self.dead_ticks >= self.cooldown_ticks {
                    self.dead_ticks = 0;
                    self.move_ticks = 0;
                    self.cooldown_ticks = secs_to_ticks(POWERUP_COOLDOWN_SECS);
                    self.exploded = false;
                    PowerupState::Init
                } else {
                    PowerupState::Dead
                }
            }
        };

        if self.state != previous {
            log::trace!("powerup {:?} -> {:?}", previous, self.state);
        }

        match self.state {
            PowerupState::Init => {}
            PowerupState::Move => {
                shapes::erase_powerup(canvas, self.current);
                self.colors = (random_color(rng), random_color(rng));
                shapes::powerup(canvas, self.current, self.colors);
                self.move_ticks += 1;
            }
            PowerupState::Dead => {
                self.dead_ticks += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{BACKGROUND, DrawRecorder, NullCanvas};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn in_spawn_region(p: Vec2) -> bool {
        let min_x = POWERUP_MIN_X as f32;
        let min_y = POWERUP_MIN_Y as f32;
        p.x >= min_x
            && p.x < min_x + POWERUP_SPAN_X as f32
            && p.y >= min_y
            && p.y < min_y + POWERUP_SPAN_Y as f32
    }

    #[test]
    fn test_spawns_inside_region() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut cues: Vec<SoundEffect> = Vec::new();
        let mut p = Powerup::new();
        assert!(!p.is_collidable());

        p.tick(&mut NullCanvas, &mut cues, &mut rng);
        assert_eq!(p.state, PowerupState::Move);
        assert!(p.is_collidable());
        assert!(in_spawn_region(p.position()));
        assert_eq!(p.move_ticks, 1);
    }

    #[test]
    fn test_redraw_uses_fresh_colors() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut cues: Vec<SoundEffect> = Vec::new();
        let mut rec = DrawRecorder::new();
        let mut p = Powerup::new();
        p.tick(&mut rec, &mut cues, &mut rng);
        // Erase both triangles, then draw both
        assert_eq!(rec.len(), 4);
        assert!(rec.commands[0].is_erase() && rec.commands[1].is_erase());
        assert!(!rec.commands[2].is_erase() && !rec.commands[3].is_erase());
    }

    #[test]
    fn test_marker_colors_never_erase() {
        let mut rng = Pcg32::seed_from_u64(21);
        for _ in 0..500 {
            let color = random_color(&mut rng);
            assert_ne!(color, BACKGROUND);
        }
    }

    #[test]
    fn test_expires_without_reward() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut cues: Vec<SoundEffect> = Vec::new();
        let mut p = Powerup::new();
        let mut ticks = 0;
        loop {
            p.tick(&mut NullCanvas, &mut cues, &mut rng);
            ticks += 1;
            if p.state == PowerupState::Dead {
                break;
            }
        }
        // Visible for lifetime + 1 ticks, then the expiry tick
        assert_eq!(ticks, p.lifetime_ticks + 2);
        assert!(cues.is_empty());
        assert_eq!(p.position(), parked());
        assert!(!p.is_collidable());
    }

    #[test]
    fn test_explode_rewards_and_extends_cooldown() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut cues: Vec<SoundEffect> = Vec::new();
        let mut p = Powerup::new();
        p.tick(&mut NullCanvas, &mut cues, &mut rng);
        p.explode();
        p.tick(&mut NullCanvas, &mut cues, &mut rng);

        assert_eq!(p.state, PowerupState::Dead);
        assert_eq!(cues, vec![SoundEffect::PowerUp]);
        assert_eq!(p.cooldown_ticks, secs_to_ticks(POWERUP_REWARD_COOLDOWN_SECS));
        assert!(p.cooldown_ticks > secs_to_ticks(POWERUP_COOLDOWN_SECS));
        assert_eq!(p.position(), parked());

        while p.state == PowerupState::Dead {
            p.tick(&mut NullCanvas, &mut cues, &mut rng);
        }
        assert_eq!(p.state, PowerupState::Init);
        assert!(!p.exploded);
        assert_eq!(p.cooldown_ticks, secs_to_ticks(POWERUP_COOLDOWN_SECS));

        p.tick(&mut NullCanvas, &mut cues, &mut rng);
        assert!(in_spawn_region(p.position()));
    }
}
