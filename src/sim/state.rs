//! Game state and core simulation types
//!
//! Everything a run needs lives in one `GameState` value: the car, the
//! generated terrain, coins, run counters and the seeded RNG. Nothing is
//! global, so two states with the same seed and inputs stay identical.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::terrain::Terrain;
use crate::consts::*;
use crate::error::Result;
use crate::tuning::Tuning;

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but `start` not called yet
    NotStarted,
    /// Simulation advances every tick
    Running,
    /// Run is over; ticks are ignored until restart
    Ended,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Car rotated past the flip threshold
    Flipped,
    /// Fuel reached zero
    OutOfFuel,
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Body center
    pub pos: Vec2,
    pub vel: Vec2,
    /// Body rotation (radians, positive = clockwise on screen)
    pub angle: f32,
    pub angular_vel: f32,
    /// Wheels touching the ground this frame
    pub grounded: bool,
}

impl Car {
    /// A car at rest at `pos`
    pub fn at_rest(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            grounded: false,
        }
    }

    /// Unit vector the car is facing
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Rear and front wheel centers, rotated with the body
    pub fn wheel_positions(&self) -> [Vec2; 2] {
        let half = self.heading() * (WHEEL_BASE / 2.0);
        [self.pos - half, self.pos + half]
    }
}

/// A collectible coin (marked collected, never removed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub collected: bool,
}

/// Per-run counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Furthest distance reached from the spawn point
    pub distance: f32,
    /// Remaining fuel, always within [0, max_fuel]
    pub fuel: f32,
    /// Coins collected this run
    pub coins: u32,
    /// Frames simulated this run
    pub frames: u64,
}

impl RunStats {
    pub fn new(max_fuel: f32) -> Self {
        Self {
            distance: 0.0,
            fuel: max_fuel,
            coins: 0,
            frames: 0,
        }
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { seed: u64 },
    TerrainExtended { from_x: f32, count: usize },
    CoinCollected { id: u32, pos: Vec2 },
    RunEnded { reason: EndReason, distance: f32, coins: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Constants in effect for this run
    pub tuning: Tuning,
    /// Drives coin placement; reseeded on every start
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Set once the run ends
    pub end_reason: Option<EndReason>,
    pub car: Car,
    pub terrain: Terrain,
    /// Coins in placement order (sorted by id)
    pub coins: Vec<Coin>,
    pub stats: RunStats,
    pub camera: Camera,
    /// Events from the most recent tick (or start)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an unstarted game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create an unstarted game with custom tuning, rejecting values a run can't survive
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            end_reason: None,
            car: Car::at_rest(Vec2::new(START_X, tuning.baseline - tuning.wheel_radius)),
            terrain: Terrain::new(tuning.baseline),
            coins: Vec::new(),
            stats: RunStats::new(tuning.max_fuel),
            camera: Camera::default(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Begin (or restart) a run: reset the car and counters and regenerate terrain
    pub fn start(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.terrain.reset(self.tuning.baseline);
        self.coins.clear();
        self.next_id = 1;
        self.events.clear();

        let coins = self.terrain.generate(
            0.0,
            self.tuning.initial_segments,
            &self.tuning,
            &mut self.rng,
        );
        for pos in coins {
            self.spawn_coin(pos);
        }

        let ground = self.terrain.height_at(START_X);
        self.car = Car::at_rest(Vec2::new(START_X, ground - self.tuning.wheel_radius));
        self.stats = RunStats::new(self.tuning.max_fuel);
        self.camera.snap_to(self.car.pos.x, &self.tuning);
        self.phase = GamePhase::Running;
        self.end_reason = None;
        self.events.push(GameEvent::RunStarted { seed: self.seed });

        log::info!(
            "Run started (seed {}, {} terrain points, {} coins)",
            self.seed,
            self.terrain.len(),
            self.coins.len()
        );
    }

    /// Switch to a new seed and start
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.start();
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a coin, returning its id
    pub fn spawn_coin(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.coins.push(Coin {
            id,
            pos,
            collected: false,
        });
        id
    }

    /// Coins not yet picked up
    pub fn uncollected_coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().filter(|c| !c.collected)
    }

    /// End the run (idempotent)
    pub(crate) fn end_run(&mut self, reason: EndReason) {
        if self.phase == GamePhase::Ended {
            return;
        }
        self.phase = GamePhase::Ended;
        self.end_reason = Some(reason);
        self.events.push(GameEvent::RunEnded {
            reason,
            distance: self.stats.distance,
            coins: self.stats.coins,
        });
        log::info!(
            "Run ended ({:?}): distance {:.0}, coins {}",
            reason,
            self.stats.distance,
            self.stats.coins
        );
    }
}
