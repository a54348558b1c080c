//! Procedural rolling-hill terrain
//!
//! The ground is an append-only list of sample points at fixed horizontal
//! spacing. Heights come from three superposed sine waves, so the same x
//! always yields the same height no matter when it was generated. Between
//! samples the surface is linearly interpolated.
//!
//! Heights are screen-space y: larger values are lower on screen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::lerp;
use crate::tuning::Tuning;

/// One sampled point of the terrain curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainPoint {
    pub x: f32,
    pub height: f32,
}

/// Ground height from the hill waves alone, ignoring what has been generated
pub fn hill_height(x: f32, tuning: &Tuning) -> f32 {
    tuning.baseline + tuning.hills.iter().map(|w| w.sample(x)).sum::<f32>()
}

/// Generated terrain (sorted by x, never reordered)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    points: Vec<TerrainPoint>,
    /// Height reported outside the generated range
    baseline: f32,
}

impl Terrain {
    pub fn new(baseline: f32) -> Self {
        Self {
            points: Vec::new(),
            baseline,
        }
    }

    pub fn points(&self) -> &[TerrainPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// x of the last generated point
    pub fn frontier(&self) -> Option<f32> {
        self.points.last().map(|p| p.x)
    }

    /// True if `x` lies within the generated range
    pub fn covers(&self, x: f32) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => x >= first.x && x <= last.x,
            _ => false,
        }
    }

    /// Generated length remaining ahead of `x` (zero when nothing is generated)
    pub fn remaining_ahead(&self, x: f32) -> f32 {
        self.frontier().map_or(0.0, |f| (f - x).max(0.0))
    }

    /// Drop all points (run restart)
    pub fn reset(&mut self, baseline: f32) {
        self.points.clear();
        self.baseline = baseline;
    }

    /// Append `count` points starting at `start_x`, spaced by the segment width.
    ///
    /// Returns the positions of coins placed over the new points. A start at or
    /// behind the frontier is moved to the next slot so x stays increasing.
    pub fn generate<R: Rng>(
        &mut self,
        start_x: f32,
        count: usize,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Vec<Vec2> {
        let width = tuning.segment_width;
        let start_x = match self.frontier() {
            Some(frontier) if start_x <= frontier => {
                log::warn!(
                    "Terrain generation at x={} behind frontier {}, appending after it",
                    start_x,
                    frontier
                );
                frontier + width
            }
            _ => start_x,
        };

        let mut coins = Vec::new();
        self.points.reserve(count);
        for i in 0..count {
            let x = start_x + i as f32 * width;
            let height = hill_height(x, tuning);
            self.points.push(TerrainPoint { x, height });

            // Saturates for a chance outside [0, 1]
            if x >= tuning.coin_min_x && rng.random::<f64>() < tuning.coin_chance {
                coins.push(Vec2::new(x, height - tuning.coin_hover));
            }
        }

        log::debug!(
            "Generated {} terrain points from x={} ({} coins)",
            count,
            start_x,
            coins.len()
        );
        coins
    }

    /// Ground height at `x`, interpolated between the bracketing points
    pub fn height_at(&self, x: f32) -> f32 {
        if !self.covers(x) {
            return self.baseline;
        }
        // Index of the first point strictly right of x; covers() guarantees >= 1
        let right = self.points.partition_point(|p| p.x <= x);
        let left = right - 1;
        let Some(b) = self.points.get(right) else {
            return self.points[left].height;
        };
        let a = self.points[left];
        // Far from the origin f32 spacing can collapse to nothing; deserialized points may not be ordered
        if b.x <= a.x {
            return a.height;
        }
        let t = (x - a.x) / (b.x - a.x);
        lerp(a.height, b.height, t)
    }

    /// Local slope angle at `x` (radians) from a central difference of half-width `probe`
    pub fn angle_at(&self, x: f32, probe: f32) -> f32 {
        let dy = self.height_at(x + probe) - self.height_at(x - probe);
        dy.atan2(2.0 * probe)
    }

    /// Points needed to draw `[min_x, max_x]`, including one bracketing point per side
    pub fn visible(&self, min_x: f32, max_x: f32) -> &[TerrainPoint] {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return &[];
        };
        if min_x > last.x || max_x < first.x {
            return &[];
        }
        let start = self.points.partition_point(|p| p.x < min_x).saturating_sub(1);
        let end = (self.points.partition_point(|p| p.x <= max_x) + 1).min(self.points.len());
        &self.points[start..end]
    }
}
