//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order (coins by ID)
//! - No rendering or platform dependencies

pub mod camera;
pub mod cruise;
pub mod driver;
pub mod physics;
pub mod scoring;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod view;

pub use camera::Camera;
pub use cruise::{CruiseState, cruise_tick};
pub use driver::{FrameDriver, run_frames};
pub use physics::{Controls, integrate};
pub use scoring::collect_coins;
pub use state::{Car, Coin, EndReason, GameEvent, GamePhase, GameState, RunStats};
pub use terrain::{Terrain, TerrainPoint, hill_height};
pub use tick::{TickInput, extend_terrain, tick};
pub use view::{FrameView, snapshot};
