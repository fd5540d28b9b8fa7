//! Pickup instances seeded from the level's coin-spawn cells.
//!
//! Collected coins are flagged inactive rather than removed, so indices and
//! iteration order stay stable for the whole level session. The set is only
//! replaced wholesale by [`CollectableRegistry::rebuild`].

use glam::Vec2;

use crate::level::LevelGrid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectable {
    /// Centre of the spawn cell, in world units.
    pub position: Vec2,
    pub active: bool,
}

/// One coin taken by a [`CollectableRegistry::collect_at`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub index: usize,
    pub position: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct CollectableRegistry {
    items: Vec<Collectable>,
}

impl CollectableRegistry {
    pub fn from_grid(grid: &LevelGrid) -> Self {
        let mut registry = Self::default();
        registry.rebuild(grid);
        registry
    }

    /// Re-seeds one active coin per spawn cell, discarding the previous set.
    pub fn rebuild(&mut self, grid: &LevelGrid) {
        let half = grid.tile_size() * 0.5;
        self.items = grid
            .coin_spawns()
            .map(|(row, col)| {
                let (left, top, _, _) = grid.cell_bounds(row, col);
                Collectable {
                    position: Vec2::new(left + half, top + half),
                    active: true,
                }
            })
            .collect();
    }

    pub fn for_each_active(&self, mut visitor: impl FnMut(usize, &Collectable)) {
        for (index, item) in self.items.iter().enumerate() {
            if item.active {
                visitor(index, item);
            }
        }
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Collectable> {
        self.items.iter().filter(|item| item.active)
    }

    /// Deactivates every active coin inside the square of half-extent `radius`
    /// around `center` and reports each one.
    ///
    /// The test is per axis (`|dx| < r && |dy| < r`), not a true distance.
    pub fn collect_at(&mut self, center: Vec2, radius: f32) -> Vec<Pickup> {
        let mut taken = Vec::new();
        for (index, item) in self.items.iter_mut().enumerate() {
            if !item.active {
                continue;
            }
            let delta = (center - item.position).abs();
            if delta.x < radius && delta.y < radius {
                item.active = false;
                taken.push(Pickup {
                    index,
                    position: item.position,
                });
            }
        }
        taken
    }

    pub fn get(&self, index: usize) -> Option<&Collectable> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }
}
