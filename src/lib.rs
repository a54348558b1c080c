//! Hill Climb - a side-scrolling hill-climb racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, car physics, coins, game state)
//! - `tuning`: Data-driven physics and terrain balance
//! - `hud`: Text projections of run state for the UI layer
//! - `highscores`: Best-runs leaderboard

pub mod error;
pub mod highscores;
pub mod hud;
pub mod sim;
pub mod tuning;

pub use error::Error;
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum frames per driver step to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Largest wall-clock delta accepted by the driver (tab switches, debugger pauses)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Spawn x, also the left boundary the car cannot retreat past
    pub const START_X: f32 = 150.0;

    /// Distance between the two wheel centers
    pub const WHEEL_BASE: f32 = 40.0;

    /// World units per displayed meter
    pub const UNITS_PER_METER: f32 = 10.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Exponential smoothing step: move `current` toward `target` by `factor`
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert!((lerp(2.0, 6.0, 0.25) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_approach_converges() {
        let mut x = 0.0;
        for _ in 0..200 {
            x = approach(x, 10.0, 0.1);
        }
        assert!((x - 10.0).abs() < 0.01);
    }
}
