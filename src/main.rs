//! Missile Command headless runner
//!
//! Wires the simulation to its collaborators and drives it the way the
//! hardware does: a fast touch timer samples input, a slow game timer only
//! raises a flag, and the main loop runs one tick per consumed flag.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;

use missile_command::Settings;
use missile_command::audio::{AudioManager, AudioSink, SoundEffect};
use missile_command::autopilot::Autopilot;
use missile_command::consts::*;
use missile_command::platform::{IntervalTimer, TickFlag, TouchController};
use missile_command::renderer::DrawRecorder;
use missile_command::sim::{GameState, Peripherals, init, tick};

#[derive(Parser, Debug)]
#[command(name = "missile-command", about = "Run a headless game of Missile Command")]
struct Cli {
    /// JSON settings file (default: ./missile-command.json if present)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Game length in seconds of game ticks
    #[arg(long)]
    runtime_secs: Option<f32>,

    /// Pace the loop to wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Run with no input at all
    #[arg(long)]
    no_autopilot: bool,

    /// Print the final game state as JSON
    #[arg(long)]
    dump_state: bool,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::read(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::load(Path::new(Settings::DEFAULT_PATH)),
        };
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(secs) = self.runtime_secs {
            settings.runtime_secs = secs;
        }
        settings.realtime |= self.realtime;
        if self.no_autopilot {
            settings.autopilot = false;
        }
        settings.validate().context("invalid settings")?;
        Ok(settings)
    }
}

/// What a finished run reports
#[derive(Debug)]
struct Summary {
    ticks_triggered: u64,
    ticks_handled: u64,
    touch_samples: u64,
    draw_commands: usize,
    cues_played: u32,
}

/// The game plus its peripherals and timers
struct Runner {
    state: GameState,
    canvas: DrawRecorder,
    touch: TouchController,
    audio: AudioManager,
    autopilot: Option<Autopilot>,
    game_timer: IntervalTimer,
    touch_timer: IntervalTimer,
    tick_flag: TickFlag,
    draw_commands: usize,
}

impl Runner {
    fn new(settings: &Settings) -> Self {
        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let mut runner = Self {
            state: GameState::new(settings.seed),
            canvas: DrawRecorder::new(),
            touch: TouchController::new(),
            audio,
            autopilot: settings.autopilot.then(Autopilot::default),
            game_timer: IntervalTimer::from_secs_f32(GAME_TIMER_PERIOD),
            touch_timer: IntervalTimer::from_secs_f32(TOUCH_TIMER_PERIOD),
            tick_flag: TickFlag::new(),
            draw_commands: 0,
        };
        init(&mut runner.state, &mut runner.canvas);
        runner.flush_canvas();
        runner.audio.play(SoundEffect::Intro);
        runner
    }

    fn flush_canvas(&mut self) {
        self.draw_commands += self.canvas.len();
        self.canvas.clear();
    }

    /// Advance simulated time by `dt`, firing whatever timers expire
    fn advance(&mut self, dt: Duration) {
        for _ in 0..self.touch_timer.advance(dt) {
            let finger = self
                .autopilot
                .as_mut()
                .and_then(|pilot| pilot.sample(&self.state));
            self.touch.sample(finger);
        }
        for _ in 0..self.game_timer.advance(dt) {
            if self.tick_flag.is_pending() {
                log::trace!("game tick {} coalesced", self.tick_flag.triggered() + 1);
            }
            self.tick_flag.raise();
        }

        if self.tick_flag.take() {
            let mut io = Peripherals {
                canvas: &mut self.canvas,
                touch: &mut self.touch,
                audio: &mut self.audio,
            };
            tick(&mut self.state, &mut io);
            self.flush_canvas();
        }
    }

    fn run(&mut self, runtime_ticks: u64, realtime: bool) -> Summary {
        let step = self.touch_timer.period();
        let started = Instant::now();
        let mut simulated = Duration::ZERO;

        while self.tick_flag.triggered() < runtime_ticks && !self.state.game_status() {
            self.advance(step);
            simulated += step;
            if realtime {
                if let Some(ahead) = simulated.checked_sub(started.elapsed()) {
                    thread::sleep(ahead);
                }
            }
        }

        Summary {
            ticks_triggered: self.tick_flag.triggered(),
            ticks_handled: self.tick_flag.handled(),
            touch_samples: self.touch.samples(),
            draw_commands: self.draw_commands,
            cues_played: self.audio.cues_played(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    log::info!(
        "Missile Command starting: seed {}, {} s, autopilot {}",
        settings.seed,
        settings.runtime_secs,
        settings.autopilot
    );

    let mut runner = Runner::new(&settings);
    let summary = runner.run(settings.runtime_ticks(), settings.realtime);
    let state = &runner.state;

    let result = match state.outcome() {
        Some(outcome) => format!("{outcome:?}"),
        None => "time up".to_string(),
    };
    println!("result:      {result}");
    println!("shots:       {}", state.shots_fired);
    println!("impacts:     {} / {}", state.impact_count, IMPACT_LIMIT);
    println!(
        "ticks:       {} handled / {} triggered",
        summary.ticks_handled, summary.ticks_triggered
    );
    println!("touch:       {} samples", summary.touch_samples);
    println!("draws:       {}", summary.draw_commands);
    println!("cues:        {}", summary.cues_played);

    if cli.dump_state {
        let json = serde_json::to_string_pretty(state).context("serializing game state")?;
        println!("{json}");
    }

    Ok(())
}
