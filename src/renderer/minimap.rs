//! Overhead map with fog of war
//!
//! Three tiers: tiles in sight are drawn bright, explored tiles out of sight
//! are drawn dim and half transparent, and unexplored tiles stay dark.

use glam::Vec2;

use super::shapes::{DrawRect, dotted_line};
use super::vertex::colors;
use crate::sim::explore::{ExploredTiles, is_tile_visible};
use crate::sim::maze::{Cell, Grid, TilePos};
use crate::sim::state::Player;
use crate::tuning::Tuning;

/// Side of the player marker (pixels)
const PLAYER_MARKER: f32 = 8.0;
/// Length of the heading indicator (pixels)
const HEADING_LENGTH: f32 = 20.0;
const HEADING_THICKNESS: f32 = 2.0;

/// Visibility tier of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Lit,
    Dim,
    Unseen,
}

pub fn tile_tier(explored: &ExploredTiles, player_tile: TilePos, tile: TilePos, vision_range: i32) -> Tier {
    if !explored.contains(tile) {
        Tier::Unseen
    } else if is_tile_visible(player_tile, tile, vision_range) {
        Tier::Lit
    } else {
        Tier::Dim
    }
}

fn tile_color(tier: Tier, cell: Cell) -> [u8; 4] {
    match (tier, cell) {
        (Tier::Unseen, _) => colors::MINIMAP_UNSEEN,
        (Tier::Lit, Cell::Wall) => colors::MINIMAP_WALL_LIT,
        (Tier::Lit, Cell::Floor) => colors::MINIMAP_FLOOR_LIT,
        (Tier::Dim, Cell::Wall) => colors::MINIMAP_WALL_DIM,
        (Tier::Dim, Cell::Floor) => colors::MINIMAP_FLOOR_DIM,
    }
}

/// Square map area anchored at `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapLayout {
    pub origin: Vec2,
    pub size: f32,
    /// Pixels per maze tile
    pub tile: f32,
}

impl MinimapLayout {
    /// Largest square that fits the left half of the screen
    pub fn fit(grid: &Grid, screen_width: f32, screen_height: f32) -> Self {
        let size = screen_height.min(screen_width / 2.0);
        let tile = size / grid.width().max(grid.height()) as f32;
        Self {
            origin: Vec2::ZERO,
            size,
            tile,
        }
    }

    /// World position to map pixels
    pub fn project(&self, world: Vec2, tile_size: f32) -> Vec2 {
        self.origin + world / tile_size * self.tile
    }
}

/// Draw commands for the whole map, background first
pub fn minimap_rects(
    grid: &Grid,
    explored: &ExploredTiles,
    player: &Player,
    tuning: &Tuning,
    layout: &MinimapLayout,
) -> Vec<DrawRect> {
    let player_tile = player.tile(tuning.tile_size);
    let cell_px = (layout.tile - 1.0).max(1.0);
    let mut rects = Vec::with_capacity(grid.width() * grid.height() + 16);

    rects.push(DrawRect::new(
        layout.origin.x,
        layout.origin.y,
        layout.size,
        layout.size,
        colors::MINIMAP_BACKGROUND,
    ));

    for row in 0..grid.height() as i32 {
        for col in 0..grid.width() as i32 {
            let tile = TilePos::new(col, row);
            let Some(cell) = grid.get(tile) else {
                continue;
            };
            let tier = tile_tier(explored, player_tile, tile, tuning.vision_range);
            rects.push(DrawRect::new(
                layout.origin.x + col as f32 * layout.tile,
                layout.origin.y + row as f32 * layout.tile,
                cell_px,
                cell_px,
                tile_color(tier, cell),
            ));
        }
    }

    let marker = layout.project(player.pos, tuning.tile_size);
    rects.push(DrawRect::centered(marker, PLAYER_MARKER, colors::PLAYER));
    rects.extend(dotted_line(
        marker,
        player.forward(),
        HEADING_LENGTH,
        HEADING_THICKNESS,
        colors::HEADING,
    ));
    rects
}
