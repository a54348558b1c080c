//! Horizontal follow camera
//!
//! Keeps the car at a fixed fraction of the viewport width, easing toward
//! the target with exponential smoothing so the view never jerks.

use serde::{Deserialize, Serialize};

use crate::approach;
use crate::tuning::Tuning;

/// Default viewport width when the host has not reported one
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;

/// Horizontal scroll state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World x at the left edge of the viewport
    pub offset: f32,
    pub viewport_width: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: 0.0,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }
}

impl Camera {
    /// Offset that puts `car_x` at the anchor fraction of the viewport
    pub fn target_for(&self, car_x: f32, tuning: &Tuning) -> f32 {
        car_x - self.viewport_width * tuning.camera_anchor
    }

    /// Ease toward the target for one frame
    pub fn follow(&mut self, car_x: f32, tuning: &Tuning) {
        let target = self.target_for(car_x, tuning);
        self.offset = approach(self.offset, target, tuning.camera_smoothing);
    }

    /// Jump straight to the target (run start)
    pub fn snap_to(&mut self, car_x: f32, tuning: &Tuning) {
        self.offset = self.target_for(car_x, tuning);
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.viewport_width = width;
        } else {
            log::warn!("Ignoring invalid viewport width {}", width);
        }
    }

    /// World-space horizontal range currently on screen
    pub fn visible_range(&self) -> (f32, f32) {
        (self.offset, self.offset + self.viewport_width)
    }
}
