//! Fog-of-war exploration tracking
//!
//! Everything within `vision_range` tiles (Euclidean, through walls) of the
//! player's tile is marked explored. The set only grows until it is cleared.

use std::collections::HashSet;

use super::maze::{Grid, TilePos};

/// Euclidean tile-distance test used for both discovery and the lit tier
#[inline]
pub fn is_tile_visible(player_tile: TilePos, tile: TilePos, vision_range: i32) -> bool {
    let dx = tile.col as i64 - player_tile.col as i64;
    let dy = tile.row as i64 - player_tile.row as i64;
    let r = vision_range as i64;
    // Integer compare is exact where sqrt(dx² + dy²) <= r would round
    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)) <= r.saturating_mul(r)
}

/// Set of tiles seen this session
#[derive(Debug, Clone, Default)]
pub struct ExploredTiles {
    tiles: HashSet<TilePos>,
}

impl ExploredTiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every in-bounds tile within vision of `player_tile`
    ///
    /// Returns the number of newly discovered tiles.
    pub fn update(&mut self, grid: &Grid, player_tile: TilePos, vision_range: i32) -> usize {
        let before = self.tiles.len();
        let r = vision_range.max(0) as i64;
        let (col, row) = (player_tile.col as i64, player_tile.row as i64);

        // Only the part of the vision square that overlaps the grid
        let cols = (col - r).max(0)..=(col + r).min(grid.width() as i64 - 1);
        let rows = (row - r).max(0)..=(row + r).min(grid.height() as i64 - 1);

        for y in rows {
            for x in cols.clone() {
                let tile = TilePos::new(x as i32, y as i32);
                if is_tile_visible(player_tile, tile, vision_range.max(0)) {
                    self.tiles.insert(tile);
                }
            }
        }

        self.tiles.len() - before
    }

    /// Record a single tile; out-of-bounds tiles are ignored
    pub fn insert(&mut self, grid: &Grid, tile: TilePos) -> bool {
        grid.in_bounds(tile) && self.tiles.insert(tile)
    }

    #[inline]
    pub fn contains(&self, tile: TilePos) -> bool {
        self.tiles.contains(&tile)
    }

    /// Total explored tiles, walls included
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &TilePos> {
        self.tiles.iter()
    }

    /// Explored tiles that are floor
    pub fn explored_floor(&self, grid: &Grid) -> usize {
        self.tiles.iter().filter(|t| grid.is_floor(**t)).count()
    }

    /// Fraction of the maze's floor that has been seen (0 for floorless grids)
    pub fn exploration_ratio(&self, grid: &Grid) -> f64 {
        exploration_ratio(self.explored_floor(grid), grid.floor_count())
    }

    pub fn is_superset(&self, other: &ExploredTiles) -> bool {
        self.tiles.is_superset(&other.tiles)
    }
}

#[inline]
pub fn exploration_ratio(explored_floor: usize, floor_total: usize) -> f64 {
    if floor_total == 0 {
        0.0
    } else {
        explored_floor as f64 / floor_total as f64
    }
}

/// Win test: reaching the threshold exactly counts
#[inline]
pub fn reached_threshold(explored_floor: usize, floor_total: usize, threshold: f64) -> bool {
    floor_total > 0 && exploration_ratio(explored_floor, floor_total) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::{Cell, MazeGenerator};
    use proptest::prelude::*;

    #[test]
    fn test_vision_boundary_on_axis() {
        let grid = Grid::filled(25, 25, Cell::Floor);
        let mut explored = ExploredTiles::new();
        explored.update(&grid, TilePos::new(10, 10), 6);

        assert!(explored.contains(TilePos::new(10, 16)));
        assert!(!explored.contains(TilePos::new(10, 17)));
        assert!(explored.contains(TilePos::new(4, 10)));
        // sqrt(4² + 5²) ≈ 6.4
        assert!(!explored.contains(TilePos::new(14, 15)));
        assert!(explored.contains(TilePos::new(14, 14)));
    }

    #[test]
    fn test_update_clips_to_grid() {
        let grid = Grid::filled(5, 5, Cell::Wall);
        let mut explored = ExploredTiles::new();
        explored.update(&grid, TilePos::new(0, 0), 6);
        assert_eq!(explored.len(), 25);
        assert!(explored.iter().all(|t| grid.in_bounds(*t)));
    }

    #[test]
    fn test_huge_vision_covers_grid_once() {
        let grid = Grid::filled(7, 5, Cell::Floor);
        let mut explored = ExploredTiles::new();
        assert_eq!(explored.update(&grid, TilePos::new(3, 2), i32::MAX), 35);
        assert_eq!(explored.update(&grid, TilePos::new(i32::MAX, i32::MIN), i32::MAX), 0);
        assert!(is_tile_visible(TilePos::new(0, 0), TilePos::new(i32::MAX, 0), i32::MAX));
        assert!(!is_tile_visible(TilePos::new(i32::MIN, 0), TilePos::new(i32::MAX, 0), i32::MAX));
    }

    #[test]
    fn test_update_is_idempotent() {
        let grid = Grid::filled(15, 15, Cell::Floor);
        let mut explored = ExploredTiles::new();
        let first = explored.update(&grid, TilePos::new(7, 7), 3);
        let second = explored.update(&grid, TilePos::new(7, 7), 3);
        assert!(first > 0);
        assert_eq!(second, 0);
    }

    #[test]
    fn test_visibility_matches_discovery() {
        let player = TilePos::new(3, 3);
        assert!(is_tile_visible(player, TilePos::new(3, 9), 6));
        assert!(!is_tile_visible(player, TilePos::new(3, 10), 6));
        assert!(is_tile_visible(player, player, 0));
    }

    #[test]
    fn test_ratio_counts_floor_only() {
        let grid = Grid::from_rows(&["#####", "#...#", "#####"]).unwrap();
        let mut explored = ExploredTiles::new();
        explored.insert(&grid, TilePos::new(0, 0));
        explored.insert(&grid, TilePos::new(1, 1));
        assert!(!explored.insert(&grid, TilePos::new(9, 9)));
        assert_eq!(explored.len(), 2);
        assert_eq!(explored.explored_floor(&grid), 1);
        assert!((explored.exploration_ratio(&grid) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(reached_threshold(4, 5, 0.8));
        assert!(reached_threshold(8, 10, 0.8));
        assert!(!reached_threshold(79, 100, 0.8));
        assert!(reached_threshold(80, 100, 0.8));
        assert!(!reached_threshold(0, 0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_exploration_never_shrinks(
            seed in any::<u64>(),
            walk in proptest::collection::vec((0i32..25, 0i32..25), 1..20),
            vision in 0i32..8,
        ) {
            let grid = MazeGenerator::new(seed).generate(25, 25);
            let mut explored = ExploredTiles::new();
            for (col, row) in walk {
                let before = explored.clone();
                explored.update(&grid, TilePos::new(col, row), vision);
                prop_assert!(explored.is_superset(&before));
                prop_assert!(explored.iter().all(|t| grid.in_bounds(*t)));
            }
        }
    }
}
