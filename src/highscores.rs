//! Best-runs leaderboard
//!
//! Runs are ranked by whole meters reached, with coins breaking ties. The
//! board only produces and parses JSON; the host decides where it is kept.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hud::meters;
use crate::sim::{EndReason, GameState};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Whole meters reached
    pub distance_m: u32,
    pub coins: u32,
    /// Course seed, so the run can be replayed
    pub seed: u64,
    /// None when the run was abandoned before it ended
    #[serde(default)]
    pub ended_by: Option<EndReason>,
}

impl RunRecord {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            distance_m: meters(state.stats.distance),
            coins: state.stats.coins,
            seed: state.seed,
            ended_by: state.end_reason,
        }
    }

    /// Ordering key, larger is better
    fn score(&self) -> (u32, u32) {
        (self.distance_m, self.coins)
    }
}

/// Leaderboard, best run first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<RunRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank (1-indexed) the run would take, or None if it stays off the board.
    ///
    /// A run that merely equals an existing entry ranks below it.
    pub fn rank_for(&self, record: &RunRecord) -> Option<usize> {
        if record.distance_m == 0 {
            return None;
        }
        let index = self
            .entries
            .partition_point(|e| e.score() >= record.score());
        (index < MAX_HIGH_SCORES).then_some(index + 1)
    }

    /// Insert a run, returning its rank, or None if it didn't make the board
    pub fn add_run(&mut self, record: RunRecord) -> Option<usize> {
        let rank = self.rank_for(&record)?;
        log::info!(
            "Run of {}m ({} coins, seed {}) placed at rank {}",
            record.distance_m,
            record.coins,
            record.seed,
            rank
        );
        self.entries.insert(rank - 1, record);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.entries.first()
    }

    /// Best kept run on one course
    pub fn best_for_seed(&self, seed: u64) -> Option<&RunRecord> {
        self.entries.iter().find(|e| e.seed == seed)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored board. Entries are re-ranked and trimmed, since the
    /// host may hand back anything.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.retain(|e| e.distance_m > 0);
        // Stable, so stored order survives among ties
        scores.entries.sort_by(|a, b| b.score().cmp(&a.score()));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::debug!("Loaded {} leaderboard entries", scores.entries.len());
        Ok(scores)
    }
}
