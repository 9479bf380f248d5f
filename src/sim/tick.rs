//! Fixed timestep simulation tick
//!
//! The orchestrator advances the whole world by one game tick and resolves
//! every cross-entity effect: scoring, respawns, launches and collisions.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{active_blasts, caught_by_any};
use super::state::{
    ENEMY_FIRST_HALF, ENEMY_SECOND_HALF, GameOutcome, GameState, PLAYER_FIRST_HALF,
    PLAYER_SECOND_HALF,
};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::platform::{TouchScreen, TouchStatus};
use crate::renderer::{BACKGROUND, Canvas, Color, shapes};

/// The collaborators a tick talks to
pub struct Peripherals<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub touch: &'a mut dyn TouchScreen,
    pub audio: &'a mut dyn AudioSink,
}

/// Reset the world for a new game: every slot dead, plane and powerup back
/// to their first state, counters zeroed, screen cleared
pub fn init(state: &mut GameState, canvas: &mut dyn Canvas) {
    state.missiles.kill_all();
    state.plane.init(&mut state.missiles.plane);
    state.powerup.init();
    state.rng = Pcg32::seed_from_u64(state.seed);
    state.shots_fired = 0;
    state.impact_count = 0;
    state.game_over = false;
    state.outcome = None;
    state.first_half = true;
    state.time_ticks = 0;
    canvas.fill_screen(BACKGROUND);
    log::info!("new game, seed {}", state.seed);
}

fn end_game(state: &mut GameState, outcome: GameOutcome, audio: &mut dyn AudioSink) {
    if state.game_over {
        return;
    }
    state.game_over = true;
    state.outcome = Some(outcome);
    audio.play(SoundEffect::GameOver);
    log::info!(
        "game over ({:?}) after {} ticks: {} shots, {} impacts",
        outcome,
        state.time_ticks,
        state.shots_fired,
        state.impact_count
    );
}

/// Advance the game state by one game tick. Does nothing once the game is over.
pub fn tick(state: &mut GameState, io: &mut Peripherals<'_>) {
    if state.game_over {
        return;
    }

    // Each missile slot advances every other call
    if state.first_half {
        for m in &mut state.missiles.enemy[ENEMY_FIRST_HALF] {
            m.tick(io.canvas);
        }
        for m in &mut state.missiles.player[PLAYER_FIRST_HALF] {
            m.tick(io.canvas);
        }
    } else {
        for m in &mut state.missiles.enemy[ENEMY_SECOND_HALF] {
            m.tick(io.canvas);
        }
        for m in &mut state.missiles.player[PLAYER_SECOND_HALF] {
            m.tick(io.canvas);
        }
        state.missiles.plane.tick(io.canvas);
    }
    state.first_half = !state.first_half;

    shapes::stats(io.canvas, state.shots_fired, state.impact_count, BACKGROUND);

    state
        .plane
        .tick(&mut state.missiles.plane, io.canvas, io.audio, &mut state.rng);
    state.powerup.tick(io.canvas, io.audio, &mut state.rng);

    // Impacts
    for m in state.missiles.iter_mut().filter(|m| m.impacted) {
        m.impacted = false;
        state.impact_count += 1;
        log::debug!("{:?} missile impact at {}", m.kind, m.position());
    }
    if state.impact_count >= IMPACT_LIMIT {
        end_game(state, GameOutcome::Defeat, io.audio);
    }

    // Keep the enemy pressure up
    for m in state.missiles.enemy.iter_mut().filter(|m| m.is_dead()) {
        m.init_enemy(&mut state.rng);
    }

    // One player launch per tick; the touch is consumed even if no slot is free
    if io.touch.status() == TouchStatus::Released {
        let target = io.touch.location();
        match state.missiles.player.iter_mut().find(|m| m.is_dead()) {
            Some(slot) => {
                slot.init_player(target);
                state.shots_fired += 1;
                log::debug!("player missile launched toward {}", target);
            }
            None => log::debug!("no free player missile, tap at {} dropped", target),
        }
        io.touch.ack_touch();
    }

    // Collision sweep. Triggering only sets flags, so the blasts collected up
    // front stay valid for the whole sweep.
    let blasts = active_blasts(state.missiles.iter());
    if !blasts.is_empty() {
        for m in state.missiles.enemy.iter_mut().filter(|m| m.is_flying()) {
            if caught_by_any(m.position(), &blasts) {
                m.trigger_explosion();
            }
        }
        if caught_by_any(state.missiles.plane.position(), &blasts) {
            state.missiles.plane.trigger_explosion();
        }

        // The plane is only on screen while moving
        if state.plane.is_flying() && caught_by_any(state.plane.position(), &blasts) {
            state.plane.explode();
            log::debug!("plane shot down at {}", state.plane.position());
            end_game(state, GameOutcome::Victory, io.audio);
        }

        if state.powerup.is_collidable() && caught_by_any(state.powerup.position(), &blasts) {
            state.powerup.explode();
            state.missiles.trigger_all();
            log::debug!("powerup caught, detonating every missile");
        }
    }

    shapes::stats(io.canvas, state.shots_fired, state.impact_count, Color::WHITE);
    state.time_ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::TouchController;
    use crate::renderer::{DrawCommand, DrawRecorder};
    use crate::sim::missile::{Missile, MissileKind, MissileState};
    use crate::sim::powerup::PowerupState;
    use glam::Vec2;

    struct Rig {
        state: GameState,
        canvas: DrawRecorder,
        touch: TouchController,
        cues: Vec<SoundEffect>,
    }

    impl Rig {
        fn new(seed: u64) -> Self {
            let mut rig = Self {
                state: GameState::new(seed),
                canvas: DrawRecorder::new(),
                touch: TouchController::new(),
                cues: Vec::new(),
            };
            init(&mut rig.state, &mut rig.canvas);
            rig
        }

        fn tap(&mut self, at: Vec2) {
            self.touch.sample(Some(at));
            self.touch.sample(None);
        }

        fn step(&mut self) {
            let mut io = Peripherals {
                canvas: &mut self.canvas,
                touch: &mut self.touch,
                audio: &mut self.cues,
            };
            tick(&mut self.state, &mut io);
        }

        /// Keep the powerup out of the way of hand-placed explosions
        fn park_powerup(&mut self) {
            self.state.powerup.state = PowerupState::Dead;
        }
    }

    fn exploding(kind: MissileKind, at: Vec2, radius: f32) -> Missile {
        let mut m = Missile::new();
        m.launch(kind, at, at, 0.0);
        m.state = MissileState::ExplodingGrow;
        m.radius = radius;
        m
    }

    fn flying(kind: MissileKind, from: Vec2, to: Vec2) -> Missile {
        let mut m = Missile::new();
        m.launch(kind, from, to, 0.0);
        m.state = MissileState::Move;
        m
    }

    #[test]
    fn test_init_clears_world() {
        let mut rig = Rig::new(1);
        rig.tap(Vec2::new(100.0, 100.0));
        for _ in 0..10 {
            rig.step();
        }
        rig.state.impact_count = 5;

        rig.canvas.clear();
        init(&mut rig.state, &mut rig.canvas);
        assert!(rig.state.missiles.iter().all(Missile::is_dead));
        assert_eq!(rig.state.shots_fired, 0);
        assert_eq!(rig.state.impact_count, 0);
        assert_eq!(rig.state.time_ticks, 0);
        assert!(rig.state.first_half);
        assert!(!rig.state.game_status());
        assert_eq!(rig.canvas.commands, vec![DrawCommand::FillScreen(BACKGROUND)]);
    }

    #[test]
    fn test_first_tick_fills_enemy_slots() {
        let mut rig = Rig::new(2);
        rig.step();
        assert!(rig.state.missiles.enemy.iter().all(|m| m.state == MissileState::Init));
        assert!(rig.state.missiles.player.iter().all(Missile::is_dead));
        assert_eq!(rig.cues, vec![SoundEffect::PlaneAppear]);
        assert_eq!(rig.state.time_ticks, 1);
    }

    #[test]
    fn test_staggered_halves() {
        let mut rig = Rig::new(3);
        // Keep the plane from reclaiming its missile slot mid-test
        rig.state.plane.has_launched = true;
        rig.state.missiles.plane =
            flying(MissileKind::Plane, Vec2::new(50.0, 70.0), Vec2::new(50.0, 240.0));
        rig.state.missiles.plane.state = MissileState::Init;

        // First half: enemies are still dead when advanced, then respawn
        rig.step();
        assert_eq!(rig.state.missiles.plane.state, MissileState::Init);

        // Second half: enemy 3..7 and the plane missile advance
        rig.step();
        let enemy = &rig.state.missiles.enemy;
        assert!(enemy[ENEMY_FIRST_HALF].iter().all(|m| m.state == MissileState::Init));
        assert!(enemy[ENEMY_SECOND_HALF].iter().all(Missile::is_flying));
        assert!(rig.state.missiles.plane.is_flying());

        rig.step();
        assert!(rig.state.missiles.enemy.iter().all(Missile::is_flying));
    }

    #[test]
    fn test_one_launch_per_tick() {
        let mut rig = Rig::new(4);
        rig.tap(Vec2::new(200.0, 10.0));
        rig.step();

        let launched: Vec<_> = rig.state.missiles.player.iter().filter(|m| !m.is_dead()).collect();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].origin, Vec2::new(LAUNCH_SITE_TWO, SCREEN_HEIGHT));
        assert_eq!(rig.state.shots_fired, 1);
        assert_eq!(rig.touch.status(), TouchStatus::Idle);

        // Nothing pending, nothing launched
        rig.step();
        assert_eq!(rig.state.shots_fired, 1);
        assert_eq!(rig.state.missiles.player.iter().filter(|m| !m.is_dead()).count(), 1);
    }

    #[test]
    fn test_launch_dropped_when_pool_full() {
        let mut rig = Rig::new(5);
        for slot in rig.state.missiles.player.iter_mut() {
            slot.init_player(Vec2::new(10.0, 0.0));
        }
        rig.tap(Vec2::new(300.0, 50.0));
        rig.step();

        assert_eq!(rig.state.shots_fired, 0);
        assert_eq!(rig.touch.status(), TouchStatus::Idle);
        assert!(rig.state.missiles.player.iter().all(|m| m.destination == Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_impact_counted_once() {
        let mut rig = Rig::new(6);
        rig.state.plane.has_launched = true;
        rig.step();
        rig.state.missiles.enemy[0].impacted = true;
        rig.state.missiles.plane.impacted = true;
        rig.step();
        assert_eq!(rig.state.impact_count, 2);
        assert!(rig.state.missiles.iter().all(|m| !m.impacted));

        rig.step();
        assert_eq!(rig.state.impact_count, 2);
    }

    #[test]
    fn test_arrival_scores_impact() {
        let mut rig = Rig::new(7);
        rig.park_powerup();
        rig.step();
        let spot = Vec2::new(10.0, SCREEN_HEIGHT);
        rig.state.missiles.enemy[0].launch(MissileKind::Enemy, spot, spot, 0.0);

        for _ in 0..6 {
            rig.step();
        }
        assert_eq!(rig.state.impact_count, 1);
        assert!(rig.state.missiles.enemy[0].is_exploding());
    }

    #[test]
    fn test_impact_limit_is_defeat() {
        let mut rig = Rig::new(8);
        rig.step();
        rig.state.impact_count = IMPACT_LIMIT - 1;
        rig.state.missiles.enemy[1].impacted = true;
        rig.step();

        assert!(rig.state.game_status());
        assert_eq!(rig.state.outcome(), Some(GameOutcome::Defeat));
        assert!(!rig.state.did_you_win());
        assert_eq!(rig.cues.last(), Some(&SoundEffect::GameOver));

        // Terminal: further ticks change nothing
        let ticks = rig.state.time_ticks;
        rig.tap(Vec2::new(100.0, 100.0));
        rig.step();
        rig.step();
        assert!(rig.state.game_status());
        assert_eq!(rig.state.time_ticks, ticks);
        assert_eq!(rig.state.shots_fired, 0);
    }

    #[test]
    fn test_sweep_victims() {
        let mut rig = Rig::new(9);
        rig.park_powerup();
        let center = Vec2::new(100.0, 100.0);
        let missiles = &mut rig.state.missiles;
        missiles.player[0] = exploding(MissileKind::Player, center, 10.0);
        // Second-half slots hold still during a first-half tick
        missiles.enemy[3] = flying(MissileKind::Enemy, center, Vec2::new(100.0, 240.0));
        missiles.enemy[4] =
            flying(MissileKind::Enemy, center + Vec2::new(1.0, 0.0), Vec2::new(0.0, 240.0));
        missiles.enemy[4].state = MissileState::Init;
        missiles.enemy[5] =
            flying(MissileKind::Enemy, Vec2::new(300.0, 10.0), Vec2::new(300.0, 240.0));
        missiles.player[1] = flying(
            MissileKind::Player,
            center + Vec2::new(0.0, 2.0),
            Vec2::new(100.0, 0.0),
        );
        missiles.plane = exploding(MissileKind::Plane, center + Vec2::new(0.0, 3.0), 0.0);
        missiles.plane.state = MissileState::Init;
        assert!(rig.state.first_half);

        rig.step();
        let missiles = &rig.state.missiles;
        assert!(missiles.enemy[3].explode_requested);
        // Only flying enemies are victims
        assert!(!missiles.enemy[4].explode_requested);
        assert!(!missiles.enemy[5].explode_requested);
        // Player missiles are never victims
        assert!(!missiles.player[1].explode_requested);
        // The plane's missile is checked whatever its state
        assert!(missiles.plane.explode_requested);
    }

    #[test]
    fn test_plane_hit_is_victory() {
        let mut rig = Rig::new(10);
        rig.park_powerup();
        rig.step();
        assert!(rig.state.plane.is_flying());

        let ahead = rig.state.plane.position() + Vec2::new(PLANE_DISTANCE_PER_TICK, 0.0);
        rig.state.missiles.player[0] = exploding(MissileKind::Player, ahead, 10.0);
        rig.step();

        assert!(rig.state.plane.exploded);
        assert!(rig.state.game_status());
        assert_eq!(rig.state.outcome(), Some(GameOutcome::Victory));
        assert!(rig.state.did_you_win());
        assert_eq!(rig.cues.last(), Some(&SoundEffect::GameOver));
    }

    #[test]
    fn test_powerup_hit_detonates_pool() {
        let mut rig = Rig::new(11);
        rig.step();
        rig.step();
        let spot = Vec2::new(150.0, 120.0);
        rig.state.powerup.state = PowerupState::Move;
        rig.state.powerup.current = spot;
        rig.state.missiles.player[0] = exploding(MissileKind::Player, spot, 10.0);
        rig.state.missiles.player[2] =
            flying(MissileKind::Player, Vec2::new(240.0, 240.0), Vec2::new(240.0, 0.0));
        assert!(rig.state.first_half);

        rig.step();
        assert!(rig.state.powerup.exploded);
        assert!(rig.state.missiles.iter().all(|m| m.explode_requested));

        // Every flying missile in the advancing half detonates without moving
        let before = rig.state.missiles.player[2].position();
        rig.step();
        for m in rig.state.missiles.enemy[ENEMY_SECOND_HALF].iter() {
            assert_eq!(m.state, MissileState::ExplodingGrow);
        }
        assert_eq!(rig.state.missiles.player[2].state, MissileState::ExplodingGrow);
        assert_eq!(rig.state.missiles.player[2].position(), before);
        assert_eq!(rig.state.powerup.state, PowerupState::Dead);
        assert!(rig.cues.contains(&SoundEffect::PowerUp));
    }

    #[test]
    fn test_travel_ratio_under_stagger() {
        let mut rig = Rig::new(12);
        rig.park_powerup();
        rig.state.missiles.enemy[0].launch(
            MissileKind::Enemy,
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 100.0),
            0.0,
        );
        let n = 20;
        for _ in 0..n {
            rig.step();
        }
        let k = ENEMY_MISSILE_DISTANCE_PER_TICK;
        let expected = ((n / 2) as f32 * DOUBLE_TICK * k / 100.0).min(1.0);
        assert!((rig.state.missiles.enemy[0].travel_ratio() - expected).abs() < 1e-5);
        assert!((expected - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_score_overlay_redrawn() {
        let mut rig = Rig::new(13);
        rig.tap(Vec2::new(80.0, 40.0));
        rig.canvas.clear();
        rig.step();
        let text = rig.canvas.text();
        assert!(text.contains(&format!("{}0", shapes::SHOT_TEXT)));
        assert!(text.contains(&format!("{}1", shapes::SHOT_TEXT)));
        assert!(text.contains(shapes::IMPACTED_TEXT));
    }

    #[test]
    fn test_determinism() {
        let run = |seed: u64| {
            let mut rig = Rig::new(seed);
            for i in 0..600u32 {
                if i % 15 == 0 {
                    rig.tap(Vec2::new((i % 320) as f32, 60.0));
                }
                rig.step();
            }
            serde_json::to_string(&rig.state).unwrap()
        };
        assert_eq!(run(99999), run(99999));
    }

    #[test]
    fn test_long_run_invariants() {
        let mut rig = Rig::new(2024);
        let mut was_over = false;
        for i in 0..5000u32 {
            if i % 7 == 0 {
                rig.tap(Vec2::new((i * 37 % 320) as f32, (i * 11 % 200) as f32));
            }
            rig.step();
            for m in rig.state.missiles.iter() {
                assert!(m.radius >= 0.0);
                if !m.is_exploding() {
                    assert_eq!(m.radius, 0.0);
                }
            }
            assert!(rig.state.impact_count <= IMPACT_LIMIT || rig.state.game_status());
            if was_over {
                assert!(rig.state.game_status());
            }
            was_over = rig.state.game_status();
        }
    }
}
