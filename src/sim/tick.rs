//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically: input, turning,
//! collision-resolved movement, exploration, score, win check.

use glam::Vec2;

use super::autopilot;
use super::collision::move_player;
use super::state::{GamePhase, GameState, Player};
use crate::tuning::Tuning;

/// Input signals for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    /// One-shot: show/hide the overhead map
    pub toggle_minimap: bool,
    /// One-shot: replace the maze with a new one
    pub regenerate: bool,
    /// One-shot: end the session
    pub quit: bool,
    /// Idle/demo mode - autopilot drives the player
    pub idle_mode: bool,
}

impl TickInput {
    /// Clear one-shot signals after a tick consumed them
    pub fn clear_one_shots(&mut self) {
        self.toggle_minimap = false;
        self.regenerate = false;
        self.quit = false;
    }
}

/// Net heading change for this tick
pub fn turn_delta(input: &TickInput, turn_speed: f32) -> f32 {
    let mut delta = 0.0;
    if input.turn_left {
        delta -= turn_speed;
    }
    if input.turn_right {
        delta += turn_speed;
    }
    delta
}

/// Summed translation for the held movement keys
pub fn movement_delta(player: &Player, input: &TickInput, speed: f32) -> Vec2 {
    let forward = player.forward();
    let right = player.right();
    let mut delta = Vec2::ZERO;

    if input.forward {
        delta += forward;
    }
    if input.backward {
        delta -= forward;
    }
    if input.strafe_left {
        delta -= right;
    }
    if input.strafe_right {
        delta += right;
    }

    delta * speed
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    // Only a running session moves
    if state.phase != GamePhase::Running {
        return;
    }

    // Idle/demo mode - autopilot replaces the movement keys
    let mut input = input.clone();
    if input.idle_mode {
        let auto = autopilot::steer(state, tuning);
        input.turn_left = auto.turn_left;
        input.turn_right = auto.turn_right;
        input.forward = auto.forward;
        input.backward = auto.backward;
        input.strafe_left = auto.strafe_left;
        input.strafe_right = auto.strafe_right;
    }
    let input = &input;

    if input.quit {
        state.finish(GamePhase::Quit);
        return;
    }
    if input.toggle_minimap {
        state.toggle_minimap();
    }
    if input.regenerate {
        state.regenerate(tuning);
    }

    state.time_ticks += 1;

    // Rotation is independent of translation
    let turn = turn_delta(input, tuning.turn_speed);
    if turn != 0.0 {
        state.player.turn(turn);
    }

    let delta = movement_delta(&state.player, input, tuning.move_speed);
    if delta != Vec2::ZERO {
        let current = state.player.pos;
        state.player.pos = move_player(
            &state.grid,
            tuning.tile_size,
            current,
            current + delta,
            tuning.player_radius,
        );
    }

    let discovered = state.refresh_exploration(tuning);
    if discovered > 0 {
        log::debug!(
            "Tick {}: +{} tiles ({}/{} floor)",
            state.time_ticks,
            discovered,
            state.explored_floor(),
            state.floor_total()
        );
    }

    if state.has_reached_goal(tuning) {
        state.finish(GamePhase::Won);
    }
}
