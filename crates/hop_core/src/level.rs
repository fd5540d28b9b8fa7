//! Immutable tile map the whole simulation is resolved against.
//!
//! A level is authored as rows of characters (`.` empty, `X` solid, `C` coin
//! spawn) and turned into a flat row-major grid once. After that it never
//! changes. Lookups outside the grid answer [`CellKind::Empty`], so the level
//! always has an open border and callers can probe past its edges freely.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Empty,
    Solid,
    CoinSpawn,
}

impl CellKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | ' ' => Some(Self::Empty),
            'X' => Some(Self::Solid),
            'C' => Some(Self::CoinSpawn),
            _ => None,
        }
    }

    pub fn is_solid(self) -> bool {
        self == Self::Solid
    }
}

#[derive(Debug, Clone)]
pub struct LevelGrid {
    rows: usize,
    cols: usize,
    tile_size: f32,
    cells: Vec<CellKind>,
}

impl LevelGrid {
    pub fn from_rows<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Result<Self, String> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err("Level validation failed: tile_size must be > 0".to_string());
        }
        let Some(first) = rows.first() else {
            return Err("Level validation failed: layout has no rows".to_string());
        };
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err("Level validation failed: first row is empty".to_string());
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let len = line.chars().count();
            if len != cols {
                return Err(format!(
                    "Level validation failed: row {row} has {len} columns, expected {cols}"
                ));
            }
            for (col, c) in line.chars().enumerate() {
                let kind = CellKind::from_char(c).ok_or_else(|| {
                    format!("Level validation failed: unknown tile '{c}' at ({row}, {col})")
                })?;
                cells.push(kind);
            }
        }

        let grid = Self {
            rows: rows.len(),
            cols,
            tile_size,
            cells,
        };
        log::debug!(
            "Level parsed: {}x{} tiles at {}px, {} coin spawns",
            grid.cols,
            grid.rows,
            grid.tile_size,
            grid.coin_spawns().count()
        );
        Ok(grid)
    }

    /// Tile at `(row, col)`; anything outside the grid is empty.
    pub fn cell_at(&self, row: i32, col: i32) -> CellKind {
        if row < 0 || col < 0 {
            return CellKind::Empty;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return CellKind::Empty;
        }
        self.cells[row * self.cols + col]
    }

    pub fn is_solid(&self, row: i32, col: i32) -> bool {
        self.cell_at(row, col).is_solid()
    }

    /// Collectable spawn cells in row-major order.
    pub fn coin_spawns(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == CellKind::CoinSpawn)
            .map(|(i, _)| ((i / self.cols) as i32, (i % self.cols) as i32))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// World-space `(left, top, right, bottom)` of a cell.
    pub fn cell_bounds(&self, row: i32, col: i32) -> (f32, f32, f32, f32) {
        let left = col as f32 * self.tile_size;
        let top = row as f32 * self.tile_size;
        (left, top, left + self.tile_size, top + self.tile_size)
    }

    pub fn world_to_col(&self, world_x: f32) -> i32 {
        (world_x / self.tile_size).floor() as i32
    }

    pub fn world_to_row(&self, world_y: f32) -> i32 {
        (world_y / self.tile_size).floor() as i32
    }
}

/// Built-in demo level, sixteen rows by eighty-eight columns.
pub const WORLD_1_1: &[&str] = &[
    "........................................................................................",
    "........................................................................................",
    "........................................................................................",
    "........................................................................................",
    "........................................................................................",
    "..............................................................C.........................",
    "......................................................XXXX..............................",
    "............................................C...................C.......................",
    ".......................................XXXXXXX.............XXXXXXX......................",
    "..............................C.........................................................",
    ".....................XXXX.................C.............................................",
    ".................C.................XXXXXXX..............................................",
    "............XXXXXXX.......................................................C.............",
    "............................................XXXX...............XXXXXXX..................",
    "......C..................................................C..............................",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
];
