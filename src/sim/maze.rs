//! Maze grid and recursive-backtracking generator
//!
//! The grid is a dense row-major array of cells. Tile coordinates are signed
//! so that lookups past the border (negative or too large) are representable
//! and simply report "wall".

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{MIN_MAZE_DIM, OPENING_CHANCE};

/// A single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Floor,
}

impl Cell {
    pub fn as_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Floor => '.',
        }
    }
}

/// Integer tile coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    pub col: i32,
    pub row: i32,
}

impl TilePos {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Tile containing a world position
    #[inline]
    pub fn from_world(pos: Vec2, tile_size: f32) -> Self {
        Self {
            col: (pos.x / tile_size).floor() as i32,
            row: (pos.y / tile_size).floor() as i32,
        }
    }

    /// World position of the tile centre
    #[inline]
    pub fn center(self, tile_size: f32) -> Vec2 {
        Vec2::new(
            (self.col as f32 + 0.5) * tile_size,
            (self.row as f32 + 0.5) * tile_size,
        )
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.col + dx, self.row + dy)
    }
}

/// Error building a grid from text rows or a map file
#[derive(Debug)]
pub enum GridError {
    Empty,
    RaggedRow { row: usize, expected: usize, found: usize },
    UnknownCell { row: usize, col: usize, ch: char },
    /// Map has no floor where the player would start
    NoSpawn,
    Io(io::Error),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no rows"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::UnknownCell { row, col, ch } => {
                write!(f, "unknown cell {ch:?} at row {row}, column {col}")
            }
            Self::NoSpawn => write!(f, "no floor tile near the top-left corner to start on"),
            Self::Io(e) => write!(f, "map file: {e}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GridError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// The maze: a fixed-size grid of wall/floor cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Grid with every cell set to `cell`
    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    /// Parse rows of `#` (wall) and `.` or space (floor)
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                cells.push(match ch {
                    '#' => Cell::Wall,
                    '.' | ' ' => Cell::Floor,
                    _ => return Err(GridError::UnknownCell { row, col, ch }),
                });
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Rows as `#`/`.` strings
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.as_char()).collect())
            .collect()
    }

    /// Parse map text, one row per line; trailing blank lines are ignored
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().is_some_and(|row| row.trim().is_empty()) {
            rows.pop();
        }
        Self::from_rows(rows.as_slice())
    }

    /// Load a hand-drawn map; it must have a floor tile to spawn on
    pub fn read(path: &Path) -> Result<Self, GridError> {
        let grid = Self::parse(&fs::read_to_string(path)?)?;
        if !grid.is_floor(grid.spawn_tile()) {
            return Err(GridError::NoSpawn);
        }
        log::info!("Loaded {} map from {}", grid.size_label(), path.display());
        Ok(grid)
    }

    /// Save as text rows
    pub fn write(&self, path: &Path) -> Result<(), GridError> {
        let mut text = self.to_rows().join("\n");
        text.push('\n');
        fs::write(path, text)?;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// "WxH" label used in result records
    pub fn size_label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    #[inline]
    pub fn in_bounds(&self, tile: TilePos) -> bool {
        tile.col >= 0
            && tile.row >= 0
            && (tile.col as usize) < self.width
            && (tile.row as usize) < self.height
    }

    /// Cell at a tile, `None` outside the grid
    #[inline]
    pub fn get(&self, tile: TilePos) -> Option<Cell> {
        if self.in_bounds(tile) {
            Some(self.cells[tile.row as usize * self.width + tile.col as usize])
        } else {
            None
        }
    }

    /// Out-of-bounds tiles count as walls
    #[inline]
    pub fn is_wall(&self, tile: TilePos) -> bool {
        self.get(tile) != Some(Cell::Floor)
    }

    #[inline]
    pub fn is_floor(&self, tile: TilePos) -> bool {
        self.get(tile) == Some(Cell::Floor)
    }

    pub fn set(&mut self, tile: TilePos, cell: Cell) {
        if self.in_bounds(tile) {
            self.cells[tile.row as usize * self.width + tile.col as usize] = cell;
        }
    }

    /// Number of floor cells
    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Floor).count()
    }

    /// All floor tiles in row-major order
    pub fn floor_tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, c)| {
            (*c == Cell::Floor).then(|| TilePos::new((i % self.width) as i32, (i / self.width) as i32))
        })
    }

    /// Recommended spawn: first floor near the top-left corner, else (1,1)
    pub fn spawn_tile(&self) -> TilePos {
        let rows = 1..4usize.min(self.height.saturating_sub(2));
        for row in rows {
            for col in 1..4usize.min(self.width.saturating_sub(2)) {
                let tile = TilePos::new(col as i32, row as i32);
                if self.is_floor(tile) {
                    return tile;
                }
            }
        }
        TilePos::new(1, 1)
    }

    fn is_border(&self, tile: TilePos) -> bool {
        tile.col == 0
            || tile.row == 0
            || tile.col as usize == self.width - 1
            || tile.row as usize == self.height - 1
    }
}

/// Coerce a requested edge length to a carvable odd value
pub fn carvable_dim(requested: usize) -> usize {
    let dim = requested.max(MIN_MAZE_DIM);
    if dim % 2 == 0 { dim + 1 } else { dim }
}

/// Lattice steps: east, south, west, north
const CARVE_DIRS: [(i32, i32); 4] = [(2, 0), (0, 2), (-2, 0), (0, -2)];
pub const ORTHOGONAL: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Seeded maze generator
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    rng: Pcg32,
}

impl MazeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generate a fresh maze (dimensions coerced to odd values ≥ 5)
    pub fn generate(&mut self, width: usize, height: usize) -> Grid {
        let grid = generate(width, height, &mut self.rng);
        log::info!(
            "Generated {} maze with {} floor tiles",
            grid.size_label(),
            grid.floor_count()
        );
        grid
    }
}

/// Recursive backtracking carve plus the playability post-passes
pub fn generate<R: Rng>(width: usize, height: usize, rng: &mut R) -> Grid {
    let width = carvable_dim(width);
    let height = carvable_dim(height);
    let mut grid = Grid::filled(width, height, Cell::Wall);

    carve(&mut grid, rng);
    clear_starting_area(&mut grid);
    add_random_openings(&mut grid, rng);

    grid
}

fn carve<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let start = TilePos::new(1, 1);
    grid.set(start, Cell::Floor);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let mut neighbors = [(current, current); 4];
        let mut n = 0usize;

        for (dx, dy) in CARVE_DIRS {
            let next = current.offset(dx, dy);
            if next.col > 0
                && next.row > 0
                && (next.col as usize) < grid.width - 1
                && (next.row as usize) < grid.height - 1
                && grid.is_wall(next)
            {
                neighbors[n] = (next, current.offset(dx / 2, dy / 2));
                n += 1;
            }
        }

        if n == 0 {
            stack.pop();
            continue;
        }

        let (next, between) = neighbors[rng.random_range(0..n)];
        grid.set(next, Cell::Floor);
        grid.set(between, Cell::Floor);
        stack.push(next);
    }
}

/// Open the 3×3 pocket around (1,1), never touching the border
fn clear_starting_area(grid: &mut Grid) {
    for dy in -1..=1 {
        for dx in -1..=1 {
            let tile = TilePos::new(1 + dx, 1 + dy);
            if grid.in_bounds(tile) && !grid.is_border(tile) {
                grid.set(tile, Cell::Floor);
            }
        }
    }
}

/// Knock through a few walls that separate two passages
fn add_random_openings<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let attempts = ((grid.width * grid.height) / 100).max(1);
    let max_col = (grid.width - 3) as i32;
    let max_row = (grid.height - 3) as i32;

    for _ in 0..attempts {
        let tile = TilePos::new(rng.random_range(2..=max_col), rng.random_range(2..=max_row));
        if grid.is_floor(tile) {
            continue;
        }

        let adjacent_paths = ORTHOGONAL
            .iter()
            .filter(|(dx, dy)| grid.is_floor(tile.offset(*dx, *dy)))
            .count();

        if adjacent_paths >= 2 && rng.random_bool(OPENING_CHANCE) {
            grid.set(tile, Cell::Floor);
        }
    }
}
