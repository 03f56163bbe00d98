//! Idle/demo mode driver
//!
//! Walks the player toward the closest unexplored floor tile using only the
//! ordinary movement keys, so it is bound by the same collision rules.

use std::collections::VecDeque;

use super::explore::ExploredTiles;
use super::maze::{Grid, ORTHOGONAL, TilePos};
use super::state::GameState;
use super::tick::TickInput;
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Heading error tolerated before walking
const ALIGN_TOLERANCE: f32 = 0.1;
/// Sideways drift (in tiles) allowed off the centre-to-centre line
const CENTER_TOLERANCE: f32 = 0.05;

/// First tile on a shortest path to the nearest unexplored floor tile
///
/// Breadth-first over floor tiles in a fixed neighbour order so the choice is
/// deterministic. `None` when nothing reachable is left to see.
pub fn next_step(grid: &Grid, explored: &ExploredTiles, from: TilePos) -> Option<TilePos> {
    if !grid.is_floor(from) {
        return None;
    }
    let width = grid.width();
    let index = |t: TilePos| t.row as usize * width + t.col as usize;

    let mut parent: Vec<Option<TilePos>> = vec![None; width * grid.height()];
    let mut queue = VecDeque::new();
    parent[index(from)] = Some(from);
    queue.push_back(from);

    while let Some(tile) = queue.pop_front() {
        if !explored.contains(tile) {
            // Walk back to the step right after `from`
            let mut step = tile;
            while let Some(prev) = parent[index(step)] {
                if prev == from {
                    return Some(step);
                }
                step = prev;
            }
            return None;
        }
        for (dx, dy) in ORTHOGONAL {
            let next = tile.offset(dx, dy);
            if grid.is_floor(next) && parent[index(next)].is_none() {
                parent[index(next)] = Some(tile);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Movement keys for this tick
pub fn steer(state: &GameState, tuning: &Tuning) -> TickInput {
    let mut input = TickInput::default();
    let here = state.player_tile(tuning);
    let Some(step) = next_step(&state.grid, &state.explored, here) else {
        return input;
    };

    // Re-centre only when drifted off the line toward the next tile
    let center = here.center(tuning.tile_size);
    let next = step.center(tuning.tile_size);
    let axis = (next - center).normalize_or_zero();
    let offset = state.player.pos - center;
    let along = offset.dot(axis);
    let lateral = (offset - axis * along).length();
    let tolerance = (CENTER_TOLERANCE * tuning.tile_size).max(tuning.move_speed / 2.0);
    let target = if lateral <= tolerance && along >= -tolerance {
        next
    } else {
        center
    };

    let to_target = target - state.player.pos;
    let desired = to_target.y.atan2(to_target.x);
    let diff = normalize_angle(desired - state.player.angle);

    if diff > ALIGN_TOLERANCE {
        input.turn_right = true;
    } else if diff < -ALIGN_TOLERANCE {
        input.turn_left = true;
    } else {
        input.forward = true;
    }
    input
}
