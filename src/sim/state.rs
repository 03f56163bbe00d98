//! Game state and core simulation types
//!
//! One `GameState` owns everything a session needs: the maze, the player,
//! the explored set and the generator stream used for regeneration.

use glam::Vec2;

use super::explore::{ExploredTiles, reached_threshold};
use super::maze::{Grid, MazeGenerator, TilePos};
use crate::consts::TICK_HZ;
use crate::results::GameResult;
use crate::settings::Settings;
use crate::tuning::Tuning;
use crate::{heading_vector, normalize_angle};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Created, clock not running yet
    Idle,
    /// Active gameplay
    Running,
    /// Exploration threshold reached
    Won,
    /// Player left
    Quit,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Quit)
    }
}

/// Things the host may want to react to, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    MinimapToggled { visible: bool },
    MazeRegenerated { size: String },
    SessionEnded(GameResult),
}

/// Player pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// World position
    pub pos: Vec2,
    /// Heading (radians, 0 = +x, clockwise on screen)
    pub angle: f32,
}

impl Player {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self { pos, angle }
    }

    /// Stand in the middle of a tile
    pub fn at_tile(tile: TilePos, tile_size: f32) -> Self {
        Self::new(tile.center(tile_size), 0.0)
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        heading_vector(self.angle)
    }

    /// Direction of a right strafe (heading + 90°)
    #[inline]
    pub fn right(&self) -> Vec2 {
        heading_vector(self.angle + std::f32::consts::FRAC_PI_2)
    }

    #[inline]
    pub fn tile(&self, tile_size: f32) -> TilePos {
        TilePos::from_world(self.pos, tile_size)
    }

    pub fn turn(&mut self, delta: f32) {
        self.angle = normalize_angle(self.angle + delta);
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the generator stream
    pub seed: u64,
    /// Requested maze size (the grid may be rounded up to odd)
    pub requested_size: (usize, usize),
    pub grid: Grid,
    pub player: Player,
    pub explored: ExploredTiles,
    pub phase: GamePhase,
    /// Ticks spent Running
    pub time_ticks: u64,
    pub score: u64,
    pub show_minimap: bool,
    /// Pending host notifications
    pub events: Vec<GameEvent>,
    /// Floor cells in the current grid
    floor_total: usize,
    generator: MazeGenerator,
}

impl GameState {
    /// Build a session with a freshly generated maze
    pub fn new(seed: u64, width: usize, height: usize, tuning: &Tuning) -> Self {
        let mut generator = MazeGenerator::new(seed);
        let grid = generator.generate(width, height);
        let mut state = Self::with_grid(grid, tuning);
        state.seed = seed;
        state.requested_size = (width, height);
        state.generator = generator;
        state
    }

    /// Build a session from player settings
    pub fn from_settings(settings: &Settings, tuning: &Tuning, seed: u64) -> Self {
        let (width, height) = settings.maze_size.dimensions();
        let mut state = Self::new(seed, width, height, tuning);
        state.show_minimap = settings.show_minimap;
        state
    }

    /// Play a hand-drawn grid; regenerating swaps in generated mazes of its size
    pub fn with_map(grid: Grid, settings: &Settings, tuning: &Tuning, seed: u64) -> Self {
        let mut state = Self::with_grid(grid, tuning);
        state.seed = seed;
        state.generator = MazeGenerator::new(seed);
        state.show_minimap = settings.show_minimap;
        state
    }

    /// Build a session around an existing grid (regeneration uses seed 0)
    pub fn with_grid(grid: Grid, tuning: &Tuning) -> Self {
        let player = Player::at_tile(grid.spawn_tile(), tuning.tile_size);
        let mut state = Self {
            seed: 0,
            requested_size: (grid.width(), grid.height()),
            floor_total: grid.floor_count(),
            grid,
            player,
            explored: ExploredTiles::new(),
            phase: GamePhase::Idle,
            time_ticks: 0,
            score: 0,
            show_minimap: false,
            events: Vec::new(),
            generator: MazeGenerator::new(0),
        };
        state.refresh_exploration(tuning);
        state
    }

    /// Start the clock
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Running;
            log::info!(
                "Session started on {} maze (seed {})",
                self.grid.size_label(),
                self.seed
            );
        }
    }

    /// Seconds spent Running
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.time_ticks as f64 / TICK_HZ as f64
    }

    #[inline]
    pub fn player_tile(&self, tuning: &Tuning) -> TilePos {
        self.player.tile(tuning.tile_size)
    }

    #[inline]
    pub fn floor_total(&self) -> usize {
        self.floor_total
    }

    pub fn explored_floor(&self) -> usize {
        self.explored.explored_floor(&self.grid)
    }

    pub fn exploration_ratio(&self) -> f64 {
        self.explored.exploration_ratio(&self.grid)
    }

    pub fn has_reached_goal(&self, tuning: &Tuning) -> bool {
        reached_threshold(self.explored_floor(), self.floor_total, tuning.win_exploration)
    }

    /// Time bonus counting down from the budget plus a reward per tile
    pub fn compute_score(&self, tuning: &Tuning) -> u64 {
        let elapsed = self.elapsed_secs().floor() as u64;
        let time_bonus = tuning.time_budget_secs.saturating_sub(elapsed);
        time_bonus + self.explored.len() as u64 * tuning.points_per_tile
    }

    /// Mark tiles around the player and rescore
    pub fn refresh_exploration(&mut self, tuning: &Tuning) -> usize {
        let tile = self.player_tile(tuning);
        let discovered = self.explored.update(&self.grid, tile, tuning.vision_range);
        self.score = self.compute_score(tuning);
        discovered
    }

    /// Swap in a new maze, respawn, and forget what was explored
    ///
    /// The grid is built before anything is touched so no frame sees a mix.
    pub fn regenerate(&mut self, tuning: &Tuning) {
        let (width, height) = self.requested_size;
        let grid = self.generator.generate(width, height);
        let player = Player::at_tile(grid.spawn_tile(), tuning.tile_size);

        self.floor_total = grid.floor_count();
        self.grid = grid;
        self.player = player;
        self.explored.clear();
        self.refresh_exploration(tuning);

        let size = self.grid.size_label();
        log::info!("New maze generated: {}", size);
        self.events.push(GameEvent::MazeRegenerated { size });
    }

    pub fn toggle_minimap(&mut self) {
        self.show_minimap = !self.show_minimap;
        log::info!("Minimap {}", if self.show_minimap { "ON" } else { "OFF" });
        self.events.push(GameEvent::MinimapToggled {
            visible: self.show_minimap,
        });
    }

    /// Snapshot the session as a result record
    pub fn result(&self, completed: bool) -> GameResult {
        GameResult {
            completed,
            score: self.score,
            completion_time_seconds: self.elapsed_secs(),
            tiles_explored: self.explored.len(),
            maze_size: self.grid.size_label(),
            exploration_percentage: self.exploration_ratio(),
        }
    }

    /// Leave Running for a terminal phase and queue the result
    pub fn finish(&mut self, phase: GamePhase) {
        if self.phase.is_over() {
            return;
        }
        let completed = phase == GamePhase::Won;
        self.phase = phase;
        let result = self.result(completed);
        log::info!(
            "Session {}: score {}, {:.1}s, {:.1}% explored",
            if completed { "won" } else { "ended" },
            result.score,
            result.completion_time_seconds,
            result.exploration_percentage * 100.0
        );
        self.events.push(GameEvent::SessionEnded(result));
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::Cell;

    fn open_grid() -> Grid {
        let mut grid = Grid::filled(9, 9, Cell::Floor);
        for i in 0..9 {
            grid.set(TilePos::new(i, 0), Cell::Wall);
            grid.set(TilePos::new(i, 8), Cell::Wall);
            grid.set(TilePos::new(0, i), Cell::Wall);
            grid.set(TilePos::new(8, i), Cell::Wall);
        }
        grid
    }

    #[test]
    fn test_new_session_spawns_and_explores() {
        let tuning = Tuning::default();
        let state = GameState::new(5, 15, 15, &tuning);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player_tile(&tuning), TilePos::new(1, 1));
        assert!(!state.explored.is_empty());
        assert!(state.score >= tuning.time_budget_secs);
    }

    #[test]
    fn test_strafe_vector_is_right_of_heading() {
        let player = Player::new(Vec2::ZERO, 0.0);
        let right = player.right();
        // Facing +x on a y-down screen, right is +y
        assert!(right.x.abs() < 1e-6);
        assert!((right.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_score_decays_with_time() {
        let tuning = Tuning::default();
        let mut state = GameState::with_grid(open_grid(), &tuning);
        let tiles = state.explored.len() as u64;
        assert_eq!(state.compute_score(&tuning), 1000 + tiles * 10);

        state.time_ticks = 60 * 30;
        assert_eq!(state.compute_score(&tuning), 970 + tiles * 10);

        state.time_ticks = 60 * 5000;
        assert_eq!(state.compute_score(&tuning), tiles * 10);
    }

    #[test]
    fn test_regenerate_resets_exploration_and_position() {
        let tuning = Tuning::default();
        let mut state = GameState::new(9, 25, 25, &tuning);
        let before = state.grid.clone();
        state.player.pos += Vec2::new(30.0, 0.0);
        state.explored.insert(&before, TilePos::new(20, 20));

        state.regenerate(&tuning);

        assert_ne!(state.grid, before);
        assert_eq!(state.player_tile(&tuning), state.grid.spawn_tile());
        assert!(!state.explored.contains(TilePos::new(20, 20)));
        assert_eq!(state.floor_total(), state.grid.floor_count());
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::MazeRegenerated { size }] if size == "25x25"
        ));
    }

    #[test]
    fn test_hand_drawn_map_session() {
        let tuning = Tuning::default();
        let settings = Settings {
            show_minimap: true,
            ..Settings::default()
        };
        let mut state = GameState::with_map(open_grid(), &settings, &tuning, 12);
        assert_eq!(state.grid, open_grid());
        assert_eq!(state.floor_total(), 49);
        assert!(state.show_minimap);

        state.regenerate(&tuning);
        assert_ne!(state.grid, open_grid());
        assert_eq!(state.grid.size_label(), "9x9");
    }

    #[test]
    fn test_finish_emits_one_result() {
        let tuning = Tuning::default();
        let mut state = GameState::with_grid(open_grid(), &tuning);
        state.start();
        state.time_ticks = 90;
        state.finish(GamePhase::Quit);
        state.finish(GamePhase::Won);

        assert_eq!(state.phase, GamePhase::Quit);
        let events = state.drain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            GameEvent::SessionEnded(result) => {
                assert!(!result.completed);
                assert!((result.completion_time_seconds - 1.5).abs() < 1e-6);
                assert_eq!(result.maze_size, "9x9");
                assert_eq!(result.tiles_explored, state.explored.len());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
