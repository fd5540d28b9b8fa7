//! Level definition files: a character grid plus a little metadata.
//!
//! ```json
//! {
//!   "version": "0.1",
//!   "level_id": "world_1_1",
//!   "tile_size": 32,
//!   "spawn": { "col": 2, "row": 12 },
//!   "rows": ["....", "..C.", "XXXX"]
//! }
//! ```

use hop_core::config::PhysicsConfig;
use hop_core::level::LevelGrid;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub version: String,
    pub level_id: String,
    #[serde(default)]
    pub tile_size: Option<f32>,
    #[serde(default)]
    pub spawn: Option<SpawnCell>,
    pub rows: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpawnCell {
    pub col: i32,
    pub row: i32,
}

#[derive(Debug, Clone)]
pub struct LoadedLevel {
    pub version: String,
    pub level_id: String,
    pub grid: LevelGrid,
    pub spawn: Option<SpawnCell>,
}

pub fn load_level_from_path(path: &Path, physics: &PhysicsConfig) -> Result<LoadedLevel, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let file: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", path.display()))?;
    build_level(file, physics).map_err(|e| format!("{} ({})", e, path.display()))
}

fn build_level(file: LevelFile, physics: &PhysicsConfig) -> Result<LoadedLevel, String> {
    if let Some(tile_size) = file.tile_size {
        if tile_size != physics.tile_size {
            return Err(format!(
                "Level validation failed: tile_size {tile_size} does not match physics tile_size {}",
                physics.tile_size
            ));
        }
    }

    let grid = LevelGrid::from_rows(file.rows.as_slice(), physics.tile_size)?;

    if let Some(spawn) = file.spawn {
        let inside = spawn.row >= 0
            && spawn.col >= 0
            && (spawn.row as usize) < grid.rows()
            && (spawn.col as usize) < grid.cols();
        if !inside {
            return Err(format!(
                "Level validation failed: spawn cell out of bounds ({}, {})",
                spawn.col, spawn.row
            ));
        }
        if grid.is_solid(spawn.row, spawn.col) {
            return Err(format!(
                "Level validation failed: spawn cell is solid ({}, {})",
                spawn.col, spawn.row
            ));
        }
    }

    Ok(LoadedLevel {
        version: file.version,
        level_id: file.level_id,
        grid,
        spawn: file.spawn,
    })
}
