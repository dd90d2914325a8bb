//! Pacific Glide headless runner
//!
//! Flies the glider on autopilot with a fixed-timestep accumulator and
//! logs what happens. Events can be dumped as JSON lines.

use std::path::PathBuf;

use clap::Parser;
use pacific_glide::audio::{LogAudio, dispatch};
use pacific_glide::consts::*;
use pacific_glide::draw::build_scene;
use pacific_glide::sim::{GameEvent, GameState, TickInput, tick};
use pacific_glide::{ConfigError, QualityPreset, Settings, Tuning};

/// Host frame rate for the headless loop
const FRAME_DT: f32 = 1.0 / 60.0;

/// Command-line options for the headless runner
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Options {
    /// Seed for the simulation RNG
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Simulated seconds to run
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 120,
        value_parser = clap::value_parser!(u32).range(1..=86_400)
    )]
    secs: u32,
    /// Balance numbers as JSON
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Player settings as JSON
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Override the settings' quality preset (low, medium, high)
    #[arg(long, value_name = "PRESET")]
    quality: Option<QualityPreset>,
    /// Print every game event as a JSON line
    #[arg(long)]
    json: bool,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    settings: Settings,
    audio: LogAudio,
    accumulator: f32,
    input: TickInput,
    json: bool,
    best_km: u32,
}

impl Game {
    fn new(seed: u64, tuning: Tuning, settings: Settings, json: bool) -> Self {
        Self {
            state: GameState::with_config(seed, tuning, &settings),
            settings,
            audio: LogAudio::default(),
            accumulator: 0.0,
            input: TickInput {
                autopilot: true,
                ..Default::default()
            },
            json,
            best_km: 0,
        }
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.flaps.clear();
        }

        let events = self.state.drain_events();
        dispatch(&events, &self.settings, &mut self.audio);
        for event in &events {
            self.report(event);
        }
    }

    fn report(&mut self, event: &GameEvent) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(err) => log::warn!("Could not encode event: {}", err),
            }
        }
        match event {
            GameEvent::StageMessage { text, .. } => log::info!("Banner: {}", text),
            GameEvent::GameOver { km, goal_reached } => {
                self.best_km = self.best_km.max(*km);
                log::info!("Game over at {} km (goal reached: {})", km, goal_reached);
            }
            GameEvent::DialogLine { text } => log::info!("Dialog: {}", text),
            _ => {}
        }
    }
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();
    let options = Options::parse();
    log::info!("Pacific Glide (headless) starting...");

    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let mut settings = match &options.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(quality) = options.quality {
        settings.quality = quality;
    }

    let mut game = Game::new(options.seed, tuning, settings, options.json);
    let frames = (options.secs as f32 / FRAME_DT).round() as u64;
    for _ in 0..frames {
        game.update(FRAME_DT);
    }

    let scene = build_scene(&game.state);
    log::info!(
        "Done: run {}, {} km this run, best {} km, {} draw calls, {} sounds",
        game.state.run,
        game.state.km(),
        game.best_km.max(game.state.km()),
        scene.len(),
        game.audio.played.len()
    );
    Ok(())
}
