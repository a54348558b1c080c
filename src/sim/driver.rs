//! Wall-clock to frame conversion
//!
//! The simulation only understands whole frames. `FrameDriver` accumulates
//! real elapsed time from the host (display callback, test harness, headless
//! runner) and runs as many fixed frames as fit.

use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::consts::{FRAME_DT, MAX_FRAME_DELTA, MAX_SUBSTEPS};

/// Fixed-timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    accumulator: f32,
    /// Total frames run through this driver
    frames_run: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds of wall-clock time, returning the frames simulated.
    ///
    /// Deltas are clamped so a long stall cannot trigger a burst of catch-up
    /// frames. Leftover time carries into the next call; stepping stops as soon
    /// as the run is no longer active.
    pub fn step(&mut self, state: &mut GameState, input: &TickInput, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt.min(MAX_FRAME_DELTA);

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            if !state.is_running() {
                self.accumulator = 0.0;
                break;
            }
            tick(state, input);
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }
        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(FRAME_DT);
        }

        self.frames_run += substeps as u64;
        substeps
    }

    /// Fraction of a frame waiting in the accumulator (render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / FRAME_DT
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Forget pending time (restart, unpause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Run exactly `frames` ticks with the same input, stopping early if the run ends.
///
/// Returns the number of ticks that advanced the simulation.
pub fn run_frames(state: &mut GameState, input: &TickInput, frames: u32) -> u32 {
    let mut ran = 0;
    for _ in 0..frames {
        if !state.is_running() {
            break;
        }
        tick(state, input);
        ran += 1;
    }
    ran
}
