//! Data-driven game balance
//!
//! The feel constants were tuned for 19.2-unit tiles on a 480 px tall view.
//! `Tuning` rescales them to the configured tile size and screen so their
//! ratios hold: lengths scale with the tile, squared-distance falloffs with
//! its inverse square, and wall height with tile size times view height.

use crate::consts::*;
use crate::settings::Settings;

/// World-space balance values for one session
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub tile_size: f32,
    /// Player disc radius (world units)
    pub player_radius: f32,
    /// Distance moved per tick per held direction (world units)
    pub move_speed: f32,
    /// Heading change per tick per held turn key (radians)
    pub turn_speed: f32,

    pub vision_range: i32,
    /// Vision range in world units; the fog band starts beyond it
    pub ray_range: f32,
    pub fov: f32,
    pub ray_count: u32,

    /// K in `height = K / (corrected_depth + ε)`
    pub wall_height_scale: f32,
    /// Falloff inside the vision range
    pub shade_near_falloff: f32,
    /// Falloff in the fog band
    pub shade_far_falloff: f32,

    pub win_exploration: f64,
    pub points_per_tile: u64,
    pub time_budget_secs: u64,
}

impl Tuning {
    pub fn from_settings(settings: &Settings) -> Self {
        let tile_size = settings.tile_size;
        let scale = tile_size / REFERENCE_TILE_SIZE;
        let view_height = settings.screen_height as f32;

        Self {
            tile_size,
            player_radius: settings.player_radius * scale,
            move_speed: settings.move_speed * scale,
            turn_speed: settings.turn_speed,

            vision_range: settings.vision_range,
            ray_range: settings.vision_range as f32 * tile_size,
            fov: settings.fov,
            ray_count: settings.ray_count,

            wall_height_scale: WALL_HEIGHT_SCALE * scale * (view_height / REFERENCE_VIEW_HEIGHT),
            shade_near_falloff: SHADE_NEAR_FALLOFF / (scale * scale),
            shade_far_falloff: SHADE_FAR_FALLOFF / (scale * scale),

            win_exploration: settings.win_exploration,
            points_per_tile: settings.points_per_tile,
            time_budget_secs: settings.time_budget_secs,
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tile_keeps_literal_constants() {
        let settings = Settings {
            tile_size: REFERENCE_TILE_SIZE,
            ..Settings::default()
        };
        let tuning = Tuning::from_settings(&settings);
        assert!((tuning.wall_height_scale - WALL_HEIGHT_SCALE).abs() < 1e-2);
        assert!((tuning.shade_near_falloff - SHADE_NEAR_FALLOFF).abs() < 1e-9);
        assert!((tuning.player_radius - 8.0).abs() < 1e-5);
        assert!((tuning.move_speed - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_ratios_survive_rescaling() {
        let tuning = Tuning::default();
        // Radius and speed stay the same fraction of a tile
        assert!((tuning.player_radius / tuning.tile_size - 8.0 / REFERENCE_TILE_SIZE).abs() < 1e-5);
        assert!((tuning.move_speed / tuning.tile_size - 1.5 / REFERENCE_TILE_SIZE).abs() < 1e-5);
        // Same shade at the same distance measured in tiles
        let d_ref = 3.0 * REFERENCE_TILE_SIZE;
        let d_new = 3.0 * tuning.tile_size;
        let ref_term = d_ref * d_ref * SHADE_NEAR_FALLOFF;
        let new_term = d_new * d_new * tuning.shade_near_falloff;
        assert!((ref_term - new_term).abs() < 1e-4);
        assert!((tuning.shade_far_falloff / tuning.shade_near_falloff - 10.0).abs() < 1e-3);
    }
}
