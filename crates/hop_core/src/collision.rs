//! Axis-separated rectangle-vs-grid collision resolution.
//!
//! The player is an axis-aligned box; the world is the solid cells of a
//! [`LevelGrid`]. Motion is resolved one axis at a time: the caller moves
//! horizontally first, then vertically using the already-corrected x. Each
//! pass only ever looks at one axis, which keeps corner cases from tunneling
//! diagonally and gives the familiar "slide along walls" feel.
//!
//! A pass sweeps the box from its current position to its candidate position
//! and clamps against every solid cell in that span. Overlapping solids are all
//! applied; whichever produces the tightest clamp wins. Bodies stop a small
//! contact epsilon short of the face they hit so the next tick does not start
//! out touching it.
//!
//! Nothing here can fail. Cells outside the grid are empty, so a box partly
//! outside the level simply moves unobstructed there.

use std::ops::Range;

use glam::Vec2;

use crate::level::LevelGrid;

/// Shrink applied to box edges when mapping them onto cells, so a box that
/// merely touches a face does not count as overlapping the cell behind it.
const EDGE_EPS: f32 = 0.001;

/// Axis-aligned box, positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisResolution {
    /// Corrected coordinate along the resolved axis (`x` or `y`).
    pub position: f32,
    /// True when at least one solid cell clamped the motion.
    pub blocked: bool,
}

pub struct CollisionResolver<'a> {
    grid: &'a LevelGrid,
    contact_epsilon: f32,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(grid: &'a LevelGrid, contact_epsilon: f32) -> Self {
        Self {
            grid,
            contact_epsilon,
        }
    }

    /// Row and column ranges the box overlaps, limited to the grid.
    ///
    /// Either range may be empty when the box lies completely outside.
    pub fn overlapping_cells(&self, rect: Aabb) -> (Range<i32>, Range<i32>) {
        let rows = self.cell_span(rect.y, rect.bottom(), self.grid.rows());
        let cols = self.cell_span(rect.x, rect.right(), self.grid.cols());
        (rows, cols)
    }

    /// Solid cells overlapped by the box, row-major.
    pub fn solid_cells(&self, rect: Aabb) -> Vec<(i32, i32)> {
        let (rows, cols) = self.overlapping_cells(rect);
        let mut hits = Vec::new();
        for row in rows {
            for col in cols.clone() {
                if self.grid.is_solid(row, col) {
                    hits.push((row, col));
                }
            }
        }
        hits
    }

    /// Moves `rect` by `delta` along `axis` and pushes it back out of any solid
    /// cell it would pass into.
    ///
    /// `rect` is the box before the move. Only the coordinate on `axis` is
    /// considered; the other one stays as given, which is what makes the sweep
    /// axis-separated. A zero or non-finite `delta` is no motion.
    pub fn resolve_axis(&self, rect: Aabb, axis: Axis, delta: f32) -> AxisResolution {
        let (start, size) = match axis {
            Axis::Horizontal => (rect.x, rect.width),
            Axis::Vertical => (rect.y, rect.height),
        };
        if delta == 0.0 || !delta.is_finite() {
            return AxisResolution {
                position: start,
                blocked: false,
            };
        }

        let candidate = start + delta;
        let swept_start = start.min(candidate);
        let swept_len = size + delta.abs();
        let swept = match axis {
            Axis::Horizontal => Aabb {
                x: swept_start,
                width: swept_len,
                ..rect
            },
            Axis::Vertical => Aabb {
                y: swept_start,
                height: swept_len,
                ..rect
            },
        };

        let mut position = candidate;
        let mut blocked = false;
        for (row, col) in self.solid_cells(swept) {
            let (left, top, right, bottom) = self.grid.cell_bounds(row, col);
            let (near, far) = match axis {
                Axis::Horizontal => (left, right),
                Axis::Vertical => (top, bottom),
            };
            if delta > 0.0 {
                position = position.min(near - size - self.contact_epsilon);
            } else {
                position = position.max(far + self.contact_epsilon);
            }
            blocked = true;
        }

        AxisResolution { position, blocked }
    }

    fn cell_span(&self, min: f32, max: f32, count: usize) -> Range<i32> {
        let tile = self.grid.tile_size();
        let first = ((min + EDGE_EPS) / tile).floor();
        let last = ((max - EDGE_EPS) / tile).floor().max(first);
        let upper = count as f32 - 1.0;
        if !(first.is_finite() && last.is_finite()) || last < 0.0 || first > upper {
            return 0..0;
        }
        (first.max(0.0) as i32)..(last.min(upper) as i32 + 1)
    }
}
