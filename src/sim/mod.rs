//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major grids, fixed neighbour order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod explore;
pub mod maze;
pub mod state;
pub mod tick;

pub use clock::FixedStep;
pub use collision::{MoveOutcome, is_valid_position, move_player, resolve_move};
pub use explore::{ExploredTiles, is_tile_visible};
pub use maze::{Cell, Grid, GridError, MazeGenerator, TilePos};
pub use state::{GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
