//! Fixed timestep simulation tick
//!
//! One tick is one display frame. Order within a frame is fixed:
//! terrain look-ahead, physics, coin pickup, end-of-run checks, camera.

use super::physics::{self, Controls};
use super::scoring::collect_coins;
use super::state::{EndReason, GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Gas pedal held (right arrow, pointer down on the right half)
    pub accelerate: bool,
    /// Brake held (left arrow, pointer down on the left half)
    pub brake: bool,
}

impl TickInput {
    pub fn controls(&self) -> Controls {
        Controls {
            accelerate: self.accelerate,
            brake: self.brake,
        }
    }
}

/// Advance the game state by one frame. Does nothing unless the run is active.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.events.clear();
    state.stats.frames += 1;

    extend_terrain(state);

    physics::integrate(
        &mut state.car,
        &mut state.stats,
        &state.terrain,
        input.controls(),
        &state.tuning,
    );

    let collected = collect_coins(
        &mut state.coins,
        state.car.pos,
        &mut state.stats,
        &state.tuning,
    );
    state.events.extend(
        collected
            .into_iter()
            .map(|(id, pos)| GameEvent::CoinCollected { id, pos }),
    );

    // Flip takes priority when both happen on the same frame
    if state.car.angle.abs() > state.tuning.flip_angle {
        state.end_run(EndReason::Flipped);
    } else if state.stats.fuel <= 0.0 {
        state.end_run(EndReason::OutOfFuel);
    }

    state.camera.follow(state.car.pos.x, &state.tuning);
}

/// Keep at least the look-ahead margin of terrain generated past the car
pub fn extend_terrain(state: &mut GameState) {
    let car_x = state.car.pos.x;
    while state.terrain.remaining_ahead(car_x) < state.tuning.look_ahead {
        let before = state.terrain.frontier();
        let from_x = state
            .terrain
            .frontier()
            .map_or(0.0, |f| f + state.tuning.segment_width);
        let count = state.tuning.batch_segments;
        let coins = state
            .terrain
            .generate(from_x, count, &state.tuning, &mut state.rng);
        for pos in coins {
            state.spawn_coin(pos);
        }
        state.events.push(GameEvent::TerrainExtended { from_x, count });

        // A batch that doesn't move the frontier never will
        if state.terrain.frontier().partial_cmp(&before) != Some(std::cmp::Ordering::Greater) {
            log::warn!(
                "Terrain extension stalled at {:?} (segment_width={}, batch_segments={})",
                before,
                state.tuning.segment_width,
                state.tuning.batch_segments
            );
            break;
        }
    }

    if !state.terrain.covers(car_x) {
        log::warn!(
            "Car at x={} outside generated terrain {:?}..{:?}",
            car_x,
            state.terrain.points().first().map(|p| p.x),
            state.terrain.frontier()
        );
    }
}
