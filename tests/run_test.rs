//! End-to-end runs through the public API

use hill_climb::consts::{FRAME_DT, START_X};
use hill_climb::highscores::RunRecord;
use hill_climb::hud::{self, Hud};
use hill_climb::sim::{
    EndReason, FrameDriver, GameEvent, GamePhase, GameState, TickInput, run_frames, snapshot,
    tick,
};
use hill_climb::{HighScores, Tuning};

const GAS: TickInput = TickInput {
    accelerate: true,
    brake: false,
};

#[test]
fn full_run_reaches_an_end_state() {
    // Coins still count but no longer refill, so the tank must run dry
    let tuning = Tuning {
        coin_fuel: 0.0,
        ..Default::default()
    };
    let mut state = GameState::with_tuning(424242, tuning).unwrap();
    assert_eq!(state.phase, GamePhase::NotStarted);
    state.start();

    let mut coins_seen = 0;
    let mut last_distance = 0.0;
    while state.is_running() && state.stats.frames < 200_000 {
        tick(&mut state, &GAS);
        coins_seen += state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .count() as u32;
        assert!(state.stats.distance >= last_distance);
        last_distance = state.stats.distance;
    }

    // Holding the gas either flips the car or drains the tank eventually
    assert!(state.is_ended());
    assert!(matches!(
        state.end_reason,
        Some(EndReason::Flipped) | Some(EndReason::OutOfFuel)
    ));
    assert_eq!(coins_seen, state.stats.coins);
    assert!(state.stats.distance > 0.0);
    assert!(hud::summary(&state).is_some());

    let collected = state.coins.iter().filter(|c| c.collected).count() as u32;
    assert_eq!(collected, state.stats.coins);
}

#[test]
fn same_seed_same_run() {
    let play = |seed| {
        let mut state = GameState::new(seed);
        state.start();
        run_frames(&mut state, &GAS, 1500);
        (state.car.clone(), state.stats.clone(), state.coins.len())
    };
    assert_eq!(play(7), play(7));
}

#[test]
fn serialized_state_resumes_identically() {
    let mut original = GameState::new(555);
    original.start();
    run_frames(&mut original, &GAS, 300);

    let json = serde_json::to_string(&original).unwrap();
    let mut resumed: GameState = serde_json::from_str(&json).unwrap();

    // Far enough that new terrain (and new coin rolls) get generated
    run_frames(&mut original, &GAS, 900);
    run_frames(&mut resumed, &GAS, 900);

    assert_eq!(original.car, resumed.car);
    assert_eq!(original.stats, resumed.stats);
    assert_eq!(original.coins, resumed.coins);
    assert_eq!(original.terrain.points(), resumed.terrain.points());
}

#[test]
fn driver_matches_manual_ticks() {
    let mut driven = GameState::new(90);
    let mut manual = GameState::new(90);
    driven.start();
    manual.start();

    let mut driver = FrameDriver::new();
    let mut frames = 0;
    for _ in 0..120 {
        frames += driver.step(&mut driven, &GAS, FRAME_DT);
    }
    run_frames(&mut manual, &GAS, frames);

    assert_eq!(driven.stats.frames, frames as u64);
    assert_eq!(driven.car, manual.car);

    // Restarting mid-frame: the new run begins on a clean frame boundary
    driver.step(&mut driven, &GAS, FRAME_DT * 0.7);
    driven.start();
    driver.reset();
    assert_eq!(driver.step(&mut driven, &GAS, FRAME_DT * 0.7), 0);
    assert_eq!(driven.stats.frames, 0);
}

#[test]
fn restart_after_flip_is_clean() {
    let mut state = GameState::with_tuning(3, Tuning::flat()).unwrap();
    state.start();
    state.car.pos.y -= 100.0;
    state.car.angle = -2.0;
    tick(&mut state, &TickInput::default());
    assert_eq!(state.end_reason, Some(EndReason::Flipped));

    state.start();
    assert!(state.is_running());
    assert_eq!(state.car.pos.x, START_X);
    assert_eq!(state.car.angle, 0.0);
    assert_eq!(Hud::from_state(&state).fuel_percent, 100);
    assert!(state.events.contains(&GameEvent::RunStarted { seed: 3 }));
}

#[test]
fn view_and_leaderboard_from_a_run() {
    let mut state = GameState::new(11);
    state.start();
    run_frames(&mut state, &GAS, 600);

    let view = snapshot(&state);
    assert!(!view.terrain.is_empty());
    let [rear, front] = view.wheels;
    assert!(((rear + front) / 2.0 - view.car.pos).length() < 1e-3);
    assert!(view.coins.iter().all(|c| !c.collected));
    let screen_x = view.to_screen_x(view.car.pos.x);
    assert!(screen_x > 0.0 && screen_x < view.viewport_width);

    let mut scores = HighScores::new();
    let record = RunRecord::from_state(&state);
    assert!(record.distance_m > 0);
    assert_eq!(scores.add_run(record.clone()), Some(1));
    let restored = HighScores::from_json(&scores.to_json().unwrap()).unwrap();
    assert_eq!(restored.best(), Some(&record));
    assert_eq!(restored.best_for_seed(11), Some(&record));
}
