//! HUD text projections
//!
//! Turns run state into the numbers and strings the UI shows. The UI layer
//! only formats what it gets from here.

use serde::{Deserialize, Serialize};

use crate::consts::UNITS_PER_METER;
use crate::sim::{EndReason, GameState};

/// Values shown on the in-game HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    /// Whole meters travelled
    pub distance_m: u32,
    pub coins: u32,
    /// Fuel as a rounded percentage of the tank
    pub fuel_percent: u32,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            distance_m: meters(state.stats.distance),
            coins: state.stats.coins,
            fuel_percent: fuel_percent(state.stats.fuel, state.tuning.max_fuel),
        }
    }

    /// Single-line HUD text
    pub fn line(&self) -> String {
        format!(
            "Distance: {}m  Coins: {}  Fuel: {}%",
            self.distance_m, self.coins, self.fuel_percent
        )
    }
}

/// Convert world units to whole meters
pub fn meters(distance: f32) -> u32 {
    (distance.max(0.0) / UNITS_PER_METER).floor() as u32
}

pub fn fuel_percent(fuel: f32, max_fuel: f32) -> u32 {
    if max_fuel <= 0.0 {
        return 0;
    }
    (fuel / max_fuel * 100.0).clamp(0.0, 100.0).round() as u32
}

/// End-of-run summary, or None while the run is still going
pub fn summary(state: &GameState) -> Option<String> {
    let reason = state.end_reason?;
    let cause = match reason {
        EndReason::Flipped => "Flipped over!",
        EndReason::OutOfFuel => "Out of fuel!",
    };
    Some(format!(
        "{} Distance: {}m, Coins: {}",
        cause,
        meters(state.stats.distance),
        state.stats.coins
    ))
}
