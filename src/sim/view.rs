//! Read-only frame snapshot for renderers
//!
//! Presentation code draws from this view and never touches `GameState`
//! directly. Terrain and coins are clipped to what the camera can see.

use glam::Vec2;

use super::state::{Car, Coin, GamePhase, GameState, RunStats};
use super::terrain::TerrainPoint;

/// Extra world units drawn beyond each viewport edge
const CLIP_MARGIN: f32 = 50.0;

/// Everything needed to paint one frame
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub camera_offset: f32,
    pub viewport_width: f32,
    pub car: &'a Car,
    /// Rear and front wheel centers
    pub wheels: [Vec2; 2],
    /// Terrain points spanning the viewport (plus bracketing points)
    pub terrain: &'a [TerrainPoint],
    /// Uncollected coins inside the viewport
    pub coins: Vec<&'a Coin>,
    pub stats: &'a RunStats,
}

impl FrameView<'_> {
    /// Convert a world x to screen x
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x - self.camera_offset
    }
}

/// Build the view for the current camera position
pub fn snapshot(state: &GameState) -> FrameView<'_> {
    let (min_x, max_x) = state.camera.visible_range();
    let (min_x, max_x) = (min_x - CLIP_MARGIN, max_x + CLIP_MARGIN);

    FrameView {
        phase: state.phase,
        camera_offset: state.camera.offset,
        viewport_width: state.camera.viewport_width,
        car: &state.car,
        wheels: state.car.wheel_positions(),
        terrain: state.terrain.visible(min_x, max_x),
        coins: state
            .uncollected_coins()
            .filter(|c| c.pos.x >= min_x && c.pos.x <= max_x)
            .collect(),
        stats: &state.stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_snapshot_clips_terrain() {
        let mut state = GameState::new(2);
        state.start();
        let view = snapshot(&state);
        let (min_x, max_x) = state.camera.visible_range();

        assert!(view.terrain.len() < state.terrain.len());
        assert!(view.terrain.first().unwrap().x <= min_x.max(0.0));
        assert!(view.terrain.last().unwrap().x >= max_x);
        assert!((view.to_screen_x(state.car.pos.x) - 800.0 * 0.3).abs() < 1e-3);
    }

    #[test]
    fn test_snapshot_wheels_straddle_the_car() {
        let mut state = GameState::new(4);
        state.start();
        state.car.angle = 0.4;
        let view = snapshot(&state);
        let [rear, front] = view.wheels;
        assert!(((rear + front) / 2.0 - state.car.pos).length() < 1e-3);
        assert!((rear.distance(front) - crate::consts::WHEEL_BASE).abs() < 1e-3);
        // Nose down on screen when the angle is positive
        assert!(front.y > rear.y);
    }

    #[test]
    fn test_snapshot_hides_collected_and_offscreen_coins() {
        let mut state = GameState::new(2);
        state.start();
        let near = state.spawn_coin(state.car.pos);
        let far = state.spawn_coin(state.car.pos + glam::Vec2::new(5000.0, 0.0));
        let view = snapshot(&state);
        assert!(view.coins.iter().any(|c| c.id == near));
        assert!(view.coins.iter().all(|c| c.id != far));

        tick(&mut state, &TickInput::default());
        let view = snapshot(&state);
        assert!(view.coins.iter().all(|c| c.id != near));
    }
}
