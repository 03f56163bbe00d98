//! Ray casting for the first-person view
//!
//! Rays march through the grid in unit world steps. The first wall (or
//! out-of-bounds) sample is the hit. Strip height comes from the
//! fisheye-corrected depth, shade from the raw depth.

use glam::Vec2;

use crate::consts::{DEPTH_EPSILON, SHADE_FAR_MAX, SHADE_NEAR_MAX};
use crate::heading_vector;
use crate::sim::maze::{Grid, TilePos};
use crate::sim::state::Player;
use crate::tuning::Tuning;

/// Where a ray stopped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Unit steps marched before the hit
    pub depth: f32,
    pub tile: TilePos,
}

/// One ray of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCast {
    pub angle: f32,
    /// `None` renders as sky
    pub hit: Option<RayHit>,
    pub corrected_depth: f32,
    pub shade: u8,
    pub strip_height: f32,
}

impl RayCast {
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }

    #[inline]
    pub fn depth(&self) -> Option<f32> {
        self.hit.map(|h| h.depth)
    }
}

/// March bound: the maze diagonal in world units
pub fn max_depth(grid: &Grid, tile_size: f32) -> u32 {
    let w = grid.width() as f32;
    let h = grid.height() as f32;
    (w.hypot(h) * tile_size).ceil() as u32
}

/// March one ray from `origin`
pub fn cast_ray(grid: &Grid, tile_size: f32, origin: Vec2, angle: f32, max_depth: u32) -> Option<RayHit> {
    let dir = heading_vector(angle);
    (0..max_depth).find_map(|step| {
        let depth = step as f32;
        let tile = TilePos::from_world(origin + dir * depth, tile_size);
        grid.is_wall(tile).then_some(RayHit { depth, tile })
    })
}

/// Distance along the view direction rather than along the ray
#[inline]
pub fn correct_fisheye(depth: f32, heading: f32, ray_angle: f32) -> f32 {
    depth * (heading - ray_angle).cos()
}

/// Grey level for a wall at `depth`, dimming steeply past the vision range
pub fn shade_for_depth(depth: f32, tuning: &Tuning) -> u8 {
    let d2 = depth * depth;
    let shade = if depth <= tuning.ray_range {
        SHADE_NEAR_MAX / (1.0 + d2 * tuning.shade_near_falloff)
    } else {
        (SHADE_FAR_MAX / (1.0 + d2 * tuning.shade_far_falloff)).max(0.0)
    };
    shade.clamp(0.0, 255.0) as u8
}

/// On-screen wall height, never taller than the view
#[inline]
pub fn strip_height(corrected_depth: f32, wall_height_scale: f32, view_height: f32) -> f32 {
    (wall_height_scale / (corrected_depth + DEPTH_EPSILON)).min(view_height)
}

/// Angle of ray `index` in the fan centred on `heading`
#[inline]
pub fn ray_angle(heading: f32, fov: f32, ray_count: u32, index: u32) -> f32 {
    heading - fov / 2.0 + index as f32 * fov / ray_count as f32
}

/// Cast the full fan for one frame
pub fn cast_frame(grid: &Grid, player: &Player, tuning: &Tuning, view_height: f32) -> Vec<RayCast> {
    let limit = max_depth(grid, tuning.tile_size);
    (0..tuning.ray_count)
        .map(|i| {
            let angle = ray_angle(player.angle, tuning.fov, tuning.ray_count, i);
            match cast_ray(grid, tuning.tile_size, player.pos, angle, limit) {
                Some(hit) => {
                    let corrected_depth = correct_fisheye(hit.depth, player.angle, angle);
                    RayCast {
                        angle,
                        hit: Some(hit),
                        corrected_depth,
                        shade: shade_for_depth(hit.depth, tuning),
                        strip_height: strip_height(corrected_depth, tuning.wall_height_scale, view_height),
                    }
                }
                None => RayCast {
                    angle,
                    hit: None,
                    corrected_depth: 0.0,
                    shade: 0,
                    strip_height: 0.0,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::Cell;
    use proptest::prelude::*;

    const TILE: f32 = 64.0;

    /// Square room of side `n` with only the border walled
    fn room(n: usize) -> Grid {
        let mut grid = Grid::filled(n, n, Cell::Floor);
        for i in 0..n as i32 {
            let last = n as i32 - 1;
            grid.set(TilePos::new(i, 0), Cell::Wall);
            grid.set(TilePos::new(i, last), Cell::Wall);
            grid.set(TilePos::new(0, i), Cell::Wall);
            grid.set(TilePos::new(last, i), Cell::Wall);
        }
        grid
    }

    fn origin() -> Vec2 {
        Vec2::new(1.5 * TILE, 1.5 * TILE)
    }

    #[test]
    fn test_ray_along_x_hits_border_column() {
        let grid = room(5);
        let hit = cast_ray(&grid, TILE, origin(), 0.0, max_depth(&grid, TILE)).unwrap();
        assert_eq!(hit.tile, TilePos::new(4, 1));
        assert_eq!(hit.depth, 4.0 * TILE - origin().x);
    }

    #[test]
    fn test_shade_falls_as_room_grows() {
        let tuning = Tuning::default();
        let shades: Vec<u8> = [5, 7, 9]
            .into_iter()
            .map(|n| {
                let grid = room(n);
                let hit = cast_ray(&grid, TILE, origin(), 0.0, max_depth(&grid, TILE)).unwrap();
                assert_eq!(hit.tile.col, n as i32 - 1);
                shade_for_depth(hit.depth, &tuning)
            })
            .collect();
        assert!(shades[0] > shades[1]);
        assert!(shades[1] > shades[2]);
    }

    #[test]
    fn test_fog_band_is_darker() {
        let tuning = Tuning::default();
        let inside = shade_for_depth(tuning.ray_range, &tuning);
        let outside = shade_for_depth(tuning.ray_range + 1.0, &tuning);
        assert!(outside < inside);
        assert!(outside <= SHADE_FAR_MAX as u8);
    }

    #[test]
    fn test_short_march_is_sky() {
        let grid = room(9);
        assert_eq!(cast_ray(&grid, TILE, origin(), 0.0, 10), None);
    }

    #[test]
    fn test_fisheye_identity_on_heading_ray() {
        assert_eq!(correct_fisheye(123.0, 0.7, 0.7), 123.0);
        assert!(correct_fisheye(100.0, 0.0, 0.5) < 100.0);
    }

    #[test]
    fn test_strip_height_clamped() {
        assert_eq!(strip_height(0.0, 21000.0, 480.0), 480.0);
        assert!((strip_height(100.0, 21000.0, 480.0) - 210.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_fan() {
        let grid = room(7);
        let tuning = Tuning::default();
        let player = Player::new(Vec2::new(3.5 * TILE, 3.5 * TILE), 0.0);
        let rays = cast_frame(&grid, &player, &tuning, 480.0);
        assert_eq!(rays.len(), tuning.ray_count as usize);
        assert!(rays.iter().all(RayCast::is_hit));
        assert!((rays[0].angle + tuning.fov / 2.0).abs() < 1e-6);
        // Fan is symmetric around the heading, so strips mirror
        let mid = tuning.ray_count as usize / 2;
        assert!((rays[mid].angle).abs() < 1e-6);
        assert_eq!(rays[mid].corrected_depth, rays[mid].depth().unwrap());
    }

    proptest! {
        #[test]
        fn prop_ray_stops_at_first_wall(angle in -3.2f32..3.2) {
            let grid = room(9);
            let center = Vec2::new(4.5 * TILE, 4.5 * TILE);
            let hit = cast_ray(&grid, TILE, center, angle, max_depth(&grid, TILE)).unwrap();
            prop_assert!(grid.is_wall(hit.tile));
            // The step before the hit is still open floor
            let before = center + heading_vector(angle) * (hit.depth - 1.0);
            prop_assert!(grid.is_floor(TilePos::from_world(before, TILE)));
        }
    }
}
