//! Single-hill cruise model
//!
//! A simpler drive over one endless sine hill, viewed from the side with
//! y pointing up. There is no terrain generation or coin economy: the car
//! cruises until the tank is dry and it has rolled to a stop.

use serde::{Deserialize, Serialize};

use super::tick::TickInput;

const HILL_FREQUENCY: f32 = 0.08;
const HILL_AMPLITUDE: f32 = 3.0;
/// Body center height above the hill surface when resting
const RIDE_HEIGHT: f32 = 0.5;
const ACCEL: f32 = 0.003;
const BRAKE: f32 = 0.002;
const FUEL_BURN: f32 = 0.05;
const FRICTION: f32 = 0.99;
const GRAVITY: f32 = -0.06;
const TILT_SCALE: f32 = 0.25;
/// Camera trails the car by this much along x
pub const CAMERA_LEAD: f32 = 6.0;
/// Below this speed an empty car counts as stalled
const STALL_SPEED: f32 = 0.001;
const START_FUEL: f32 = 100.0;
const START_HEIGHT: f32 = 3.0;

/// Hill surface height (y up)
pub fn hill_height(x: f32) -> f32 {
    (x * HILL_FREQUENCY).sin() * HILL_AMPLITUDE
}

/// State of a cruise run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CruiseState {
    pub x: f32,
    pub y: f32,
    /// Forward speed per frame
    pub speed: f32,
    pub vel_y: f32,
    /// Visual body tilt (radians)
    pub tilt: f32,
    pub fuel: f32,
    /// Whole units of furthest x reached
    pub distance: i32,
    pub camera_x: f32,
    pub over: bool,
}

impl Default for CruiseState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: START_HEIGHT,
            speed: 0.0,
            vel_y: 0.0,
            tilt: 0.0,
            fuel: START_FUEL,
            distance: 0,
            camera_x: CAMERA_LEAD,
            over: false,
        }
    }
}

impl CruiseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fuel for display (never below zero)
    pub fn fuel_display(&self) -> u32 {
        self.fuel.max(0.0).round() as u32
    }
}

/// Advance one frame. Returns true once the run is over.
pub fn cruise_tick(state: &mut CruiseState, input: &TickInput) -> bool {
    if state.over {
        return true;
    }

    if input.accelerate && state.fuel > 0.0 {
        state.speed += ACCEL;
        state.fuel -= FUEL_BURN;
    }
    if input.brake {
        state.speed -= BRAKE;
    }

    state.speed *= FRICTION;
    state.x += state.speed;
    state.distance = state.distance.max(state.x.floor() as i32);

    state.vel_y += GRAVITY;
    state.y += state.vel_y;

    let ground = hill_height(state.x) + RIDE_HEIGHT;
    if state.y < ground {
        state.y = ground;
        state.vel_y = 0.0;
    }

    // Tilt follows the hill's derivative, scaled down for looks
    state.tilt = (state.x * HILL_FREQUENCY).cos() * TILT_SCALE;
    state.camera_x = state.x + CAMERA_LEAD;

    if state.fuel <= 0.0 && state.speed.abs() < STALL_SPEED {
        state.over = true;
        log::info!("Cruise over: distance {}", state.distance);
    }
    state.over
}
