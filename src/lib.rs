//! Maze Explorer - a first-person fog-of-war maze game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze generation, collision, exploration, game loop)
//! - `renderer`: Ray casting and draw-command generation for a host renderer
//! - `settings`: Player-facing configuration and presets
//! - `tuning`: World-space balance values derived from settings
//! - `results`: Session result records and the sinks that receive them
//! - `achievements`: Milestones earned from finished sessions

pub mod achievements;
pub mod renderer;
pub mod results;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use results::{GameResult, ResultSink};
pub use settings::{MazeSize, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest host frame accepted by the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Tile size the balance constants were tuned at (480 px / 25 tiles)
    pub const REFERENCE_TILE_SIZE: f32 = 19.2;
    /// View height the wall-height constant was tuned at
    pub const REFERENCE_VIEW_HEIGHT: f32 = 480.0;

    /// Wall strip height scale at the reference tile size and view height
    pub const WALL_HEIGHT_SCALE: f32 = 21000.0;
    /// Shade falloff inside the vision range (per reference unit²)
    pub const SHADE_NEAR_FALLOFF: f32 = 0.0001;
    /// Shade falloff beyond the vision range, an order of magnitude steeper
    pub const SHADE_FAR_FALLOFF: f32 = 0.001;
    /// Brightest wall shade inside the vision range
    pub const SHADE_NEAR_MAX: f32 = 255.0;
    /// Brightest wall shade in the fog band
    pub const SHADE_FAR_MAX: f32 = 50.0;
    /// Guards the wall height division
    pub const DEPTH_EPSILON: f32 = 0.0001;

    /// Smallest maze edge the generator will carve
    pub const MIN_MAZE_DIM: usize = 5;
    /// Chance that a qualifying interior wall is knocked through
    pub const OPENING_CHANCE: f64 = 0.3;
}

/// Normalized angle to [-π, π); non-finite input maps to 0
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    // rem_euclid may round up to TAU itself
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Unit vector for a heading (0 = +x, clockwise on a y-down screen)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
