use std::ops::RangeInclusive;

use glam::Vec2;

/// Side-scrolling view into the level. `position` is the world coordinate
/// of the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    pub position: Vec2,
    pub viewport: Vec2,
}

impl Camera2D {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    /// Centres the view on `target`, then clamps it inside `level_size`.
    /// On an axis where the level is smaller than the view, the view sits at 0.
    pub fn follow(&mut self, target: Vec2, level_size: Vec2) {
        let max = (level_size - self.viewport).max(Vec2::ZERO);
        let desired = target - self.viewport * 0.5;
        self.position = desired.clamp(Vec2::ZERO, max);
    }

    /// Rows and columns a renderer has to draw to cover the viewport.
    pub fn visible_cells(&self, tile_size: f32) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
        let first = (self.position / tile_size).floor();
        let last = ((self.position + self.viewport) / tile_size).ceil();
        (
            (first.y as i32)..=(last.y as i32),
            (first.x as i32)..=(last.x as i32),
        )
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }
}
