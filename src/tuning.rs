//! Data-driven game balance
//!
//! Every physics and terrain constant lives here so a run can be re-tuned
//! from JSON without recompiling. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest look-ahead margin accepted, in world units
pub const MAX_LOOK_AHEAD: f32 = 100_000.0;
/// Narrowest terrain spacing accepted; finer spacing loses precision far from the origin
pub const MIN_SEGMENT_WIDTH: f32 = 1.0;
/// Most points generated in one batch
pub const MAX_BATCH_SEGMENTS: usize = 10_000;

/// One sine component of the rolling hills
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HillWave {
    /// Peak height offset in world units
    pub amplitude: f32,
    /// Angular frequency per world unit
    pub frequency: f32,
}

impl HillWave {
    pub const fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }

    #[inline]
    pub fn sample(&self, x: f32) -> f32 {
        self.amplitude * (x * self.frequency).sin()
    }
}

/// Physics, terrain and scoring constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Terrain ===
    /// Horizontal spacing between terrain points
    pub segment_width: f32,
    /// Ground y when every wave is zero; fallback for out-of-range queries
    pub baseline: f32,
    /// Large, medium and small hills
    pub hills: [HillWave; 3],
    /// Points generated when a run starts
    pub initial_segments: usize,
    /// Points appended per extension
    pub batch_segments: usize,
    /// Generated length that must always remain ahead of the car
    pub look_ahead: f32,
    /// Half-width of the central difference used for slope
    pub angle_probe: f32,

    // === Coins ===
    /// No coins are placed before this x
    pub coin_min_x: f32,
    /// Chance per terrain point of placing a coin
    pub coin_chance: f64,
    /// Coin height above the ground
    pub coin_hover: f32,
    pub pickup_radius: f32,
    /// Fuel refilled per coin
    pub coin_fuel: f32,

    // === Car ===
    pub gravity: f32,
    pub wheel_radius: f32,
    /// Gain of the rotational controller pulling the car toward the slope
    pub align_factor: f32,
    pub accel: f32,
    pub brake: f32,
    /// Fuel burned per grounded accelerating frame
    pub fuel_burn: f32,
    pub max_forward_speed: f32,
    /// Magnitude of the reverse speed cap
    pub max_reverse_speed: f32,
    /// Horizontal velocity damping per frame
    pub friction: f32,
    /// Angular velocity damping per frame
    pub angular_friction: f32,
    pub max_fuel: f32,
    /// Run ends once |angle| exceeds this (radians)
    pub flip_angle: f32,

    // === Camera ===
    /// Car is kept at this fraction of the viewport width
    pub camera_anchor: f32,
    pub camera_smoothing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            segment_width: 20.0,
            baseline: 400.0,
            hills: [
                HillWave::new(70.0, 0.004),
                HillWave::new(35.0, 0.011),
                HillWave::new(8.0, 0.03),
            ],
            initial_segments: 200,
            batch_segments: 100,
            look_ahead: 1500.0,
            angle_probe: 5.0,

            coin_min_x: 600.0,
            coin_chance: 0.1,
            coin_hover: 40.0,
            pickup_radius: 30.0,
            coin_fuel: 20.0,

            gravity: 0.4,
            wheel_radius: 15.0,
            align_factor: 0.05,
            accel: 0.15,
            brake: 0.1,
            fuel_burn: 0.08,
            max_forward_speed: 15.0,
            max_reverse_speed: 6.0,
            friction: 0.99,
            angular_friction: 0.85,
            max_fuel: 100.0,
            flip_angle: std::f32::consts::FRAC_PI_2,

            camera_anchor: 0.3,
            camera_smoothing: 0.1,
        }
    }
}

impl Tuning {
    /// Default tuning with every hill flattened (ground sits at `baseline`)
    pub fn flat() -> Self {
        let mut tuning = Self::default();
        for wave in &mut tuning.hills {
            wave.amplitude = 0.0;
        }
        tuning
    }

    /// Terminal forward speed under held accelerate: fixed point of `v = (v + a) * f`
    pub fn terminal_speed(&self) -> f32 {
        let terminal = self.accel * self.friction / (1.0 - self.friction);
        terminal.min(self.max_forward_speed)
    }

    /// Parse tuning from JSON (partial documents fill in defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("segment_width", self.segment_width),
            ("baseline", self.baseline),
            ("look_ahead", self.look_ahead),
            ("angle_probe", self.angle_probe),
            ("coin_min_x", self.coin_min_x),
            ("coin_hover", self.coin_hover),
            ("pickup_radius", self.pickup_radius),
            ("coin_fuel", self.coin_fuel),
            ("gravity", self.gravity),
            ("wheel_radius", self.wheel_radius),
            ("align_factor", self.align_factor),
            ("accel", self.accel),
            ("brake", self.brake),
            ("fuel_burn", self.fuel_burn),
            ("max_forward_speed", self.max_forward_speed),
            ("max_reverse_speed", self.max_reverse_speed),
            ("friction", self.friction),
            ("angular_friction", self.angular_friction),
            ("max_fuel", self.max_fuel),
            ("flip_angle", self.flip_angle),
            ("camera_anchor", self.camera_anchor),
            ("camera_smoothing", self.camera_smoothing),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }
        for wave in &self.hills {
            if !wave.amplitude.is_finite() || !wave.frequency.is_finite() {
                return Err(invalid("hills", "wave parameters must be finite".into()));
            }
        }

        let positive = [
            ("segment_width", self.segment_width),
            ("angle_probe", self.angle_probe),
            ("wheel_radius", self.wheel_radius),
            ("pickup_radius", self.pickup_radius),
            ("max_fuel", self.max_fuel),
            ("flip_angle", self.flip_angle),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(invalid(field, format!("{value} must be positive")));
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("accel", self.accel),
            ("brake", self.brake),
            ("fuel_burn", self.fuel_burn),
            ("coin_fuel", self.coin_fuel),
            ("max_forward_speed", self.max_forward_speed),
            ("max_reverse_speed", self.max_reverse_speed),
            ("look_ahead", self.look_ahead),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(invalid(field, format!("{value} must not be negative")));
            }
        }

        for (field, value) in [
            ("friction", self.friction),
            ("angular_friction", self.angular_friction),
            ("camera_smoothing", self.camera_smoothing),
        ] {
            if value <= 0.0 || value > 1.0 {
                return Err(invalid(field, format!("{value} must be in (0, 1]")));
            }
        }
        if !(0.0..=1.0).contains(&self.camera_anchor) {
            return Err(invalid("camera_anchor", "must be in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.coin_chance) {
            return Err(invalid("coin_chance", "must be a probability".into()));
        }
        if self.max_reverse_speed > self.max_forward_speed {
            return Err(invalid(
                "max_reverse_speed",
                "reverse cap must not exceed forward cap".into(),
            ));
        }
        if self.segment_width < MIN_SEGMENT_WIDTH {
            return Err(invalid(
                "segment_width",
                format!("must be at least {MIN_SEGMENT_WIDTH}"),
            ));
        }
        if self.look_ahead > MAX_LOOK_AHEAD {
            return Err(invalid(
                "look_ahead",
                format!("must be at most {MAX_LOOK_AHEAD}"),
            ));
        }
        if !(2..=MAX_BATCH_SEGMENTS).contains(&self.initial_segments) {
            return Err(invalid(
                "initial_segments",
                format!("must be in 2..={MAX_BATCH_SEGMENTS}"),
            ));
        }
        if !(1..=MAX_BATCH_SEGMENTS).contains(&self.batch_segments) {
            return Err(invalid(
                "batch_segments",
                format!("must be in 1..={MAX_BATCH_SEGMENTS}"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> Error {
    Error::InvalidTuning { field, reason }
}
