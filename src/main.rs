//! Hill Climb headless runner
//!
//! Drives the simulation with a simple autopilot and logs the run.
//!
//! Usage: `hill-climb [seed] [tuning.json]` or `hill-climb cruise`

use hill_climb::consts::FRAME_DT;
use hill_climb::highscores::RunRecord;
use hill_climb::hud::{self, Hud};
use hill_climb::sim::{CruiseState, FrameDriver, GameState, TickInput, cruise_tick};
use hill_climb::{HighScores, Tuning};

const DEFAULT_SEED: u64 = 20_240_601;
/// Stop a run that is still going after this many frames (ten minutes)
const MAX_FRAMES: u64 = 60 * 60 * 10;
/// Log the HUD every this many frames
const HUD_INTERVAL: u64 = 600;
/// Nose-up angle at which the autopilot lifts off the gas
const AUTOPILOT_EASE_ANGLE: f32 = -0.9;

fn main() {
    env_logger::init();
    log::info!("Hill Climb (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("cruise") {
        run_cruise();
        return;
    }

    let seed = args
        .first()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let tuning = match args.get(1) {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning: {}", e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut state = match GameState::with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    state.start();
    let mut driver = FrameDriver::new();

    while state.is_running() && state.stats.frames < MAX_FRAMES {
        let input = autopilot(&state);
        driver.step(&mut state, &input, FRAME_DT);
        if state.stats.frames % HUD_INTERVAL == 0 {
            log::info!("{}", Hud::from_state(&state).line());
        }
    }

    match hud::summary(&state) {
        Some(summary) => println!("{}", summary),
        None => println!("Time limit reached. {}", Hud::from_state(&state).line()),
    }

    let mut scores = HighScores::new();
    if let Some(rank) = scores.add_run(RunRecord::from_state(&state)) {
        println!("Leaderboard rank: {}", rank);
    }
    match scores.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize leaderboard: {}", e),
    }
}

/// Hold the gas unless the car is pitching back toward a flip
fn autopilot(state: &GameState) -> TickInput {
    let car = &state.car;
    let climbing_too_steep = car.angle < AUTOPILOT_EASE_ANGLE;
    TickInput {
        accelerate: !climbing_too_steep,
        brake: climbing_too_steep && car.grounded,
    }
}

fn run_cruise() {
    let mut state = CruiseState::new();
    let gas = TickInput {
        accelerate: true,
        brake: false,
    };
    let mut frames = 0u64;
    while !cruise_tick(&mut state, &gas) && frames < MAX_FRAMES {
        frames += 1;
        if frames % HUD_INTERVAL == 0 {
            log::info!(
                "Fuel: {}  Distance: {}",
                state.fuel_display(),
                state.distance
            );
        }
    }
    println!("Game Over! Distance: {}", state.distance);
}
