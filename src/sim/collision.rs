//! Collision detection and wall sliding against the maze grid
//!
//! The player is a disc. Rather than exact disc/box tests we sample nine
//! points (centre, four axis points, four diagonals) and require each one to
//! land on a floor tile. Anything off the grid is solid.

use glam::Vec2;

use super::maze::{Grid, TilePos};

/// cos(45°), offset of the diagonal samples
pub const DIAGONAL: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Result of resolving a proposed move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Proposed position accepted as-is
    Full(Vec2),
    /// Only the x component was applied
    SlideX(Vec2),
    /// Only the y component was applied
    SlideY(Vec2),
    /// Nothing fit, player stays put
    Blocked(Vec2),
}

impl MoveOutcome {
    /// Final player position
    pub fn position(self) -> Vec2 {
        match self {
            MoveOutcome::Full(p)
            | MoveOutcome::SlideX(p)
            | MoveOutcome::SlideY(p)
            | MoveOutcome::Blocked(p) => p,
        }
    }
}

/// The nine points sampled around a player disc
#[inline]
pub fn disc_samples(pos: Vec2, radius: f32) -> [Vec2; 9] {
    let d = radius * DIAGONAL;
    [
        pos,
        pos + Vec2::new(radius, 0.0),
        pos + Vec2::new(-radius, 0.0),
        pos + Vec2::new(0.0, radius),
        pos + Vec2::new(0.0, -radius),
        pos + Vec2::new(d, d),
        pos + Vec2::new(-d, d),
        pos + Vec2::new(d, -d),
        pos + Vec2::new(-d, -d),
    ]
}

/// Check whether a single world point is inside a wall (or off the grid)
#[inline]
pub fn is_wall_at(grid: &Grid, tile_size: f32, point: Vec2) -> bool {
    grid.is_wall(TilePos::from_world(point, tile_size))
}

/// A position is valid iff every disc sample lands on a floor tile
pub fn is_valid_position(grid: &Grid, tile_size: f32, pos: Vec2, radius: f32) -> bool {
    disc_samples(pos, radius)
        .iter()
        .all(|p| !is_wall_at(grid, tile_size, *p))
}

/// Resolve a move with wall sliding
///
/// Order matters: the full move first, then x only, then y only.
pub fn resolve_move(
    grid: &Grid,
    tile_size: f32,
    current: Vec2,
    proposed: Vec2,
    radius: f32,
) -> MoveOutcome {
    if is_valid_position(grid, tile_size, proposed, radius) {
        return MoveOutcome::Full(proposed);
    }

    let slide_x = Vec2::new(proposed.x, current.y);
    if is_valid_position(grid, tile_size, slide_x, radius) {
        return MoveOutcome::SlideX(slide_x);
    }

    let slide_y = Vec2::new(current.x, proposed.y);
    if is_valid_position(grid, tile_size, slide_y, radius) {
        return MoveOutcome::SlideY(slide_y);
    }

    MoveOutcome::Blocked(current)
}

/// Move the player, returning the resolved position
#[inline]
pub fn move_player(grid: &Grid, tile_size: f32, current: Vec2, proposed: Vec2, radius: f32) -> Vec2 {
    resolve_move(grid, tile_size, current, proposed, radius).position()
}
