//! Game settings and preferences
//!
//! Persisted as JSON next to the game. Movement and collision values are
//! expressed in reference units (see `crate::tuning`) so they keep their feel
//! at any tile size.

use std::fmt;
use std::fs;
use std::io;
use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_TILE_SIZE;

/// More rays than this cannot map to distinct screen columns
pub const MAX_RAY_COUNT: u32 = 4096;
/// Half a tile per tick, so a move never skips over a wall
pub const MAX_MOVE_SPEED: f32 = REFERENCE_TILE_SIZE / 2.0;
/// The player disc must fit inside a corridor
pub const MAX_PLAYER_RADIUS: f32 = REFERENCE_TILE_SIZE * 0.45;

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Maze size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MazeSize {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Custom { width: usize, height: usize },
}

impl MazeSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            MazeSize::Small => "Small",
            MazeSize::Medium => "Medium",
            MazeSize::Large => "Large",
            MazeSize::Huge => "Huge",
            MazeSize::Custom { .. } => "Custom",
        }
    }

    /// Parse a preset name, or a custom size written as `WxH`
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" => Some(MazeSize::Small),
            "medium" | "med" => Some(MazeSize::Medium),
            "large" => Some(MazeSize::Large),
            "huge" => Some(MazeSize::Huge),
            other => {
                let (w, h) = other.split_once('x')?;
                Some(MazeSize::Custom {
                    width: w.trim().parse().ok()?,
                    height: h.trim().parse().ok()?,
                })
            }
        }
    }

    /// Requested grid dimensions (the generator may round these up)
    pub fn dimensions(&self) -> (usize, usize) {
        match *self {
            MazeSize::Small => (15, 15),
            MazeSize::Medium => (25, 25),
            MazeSize::Large => (35, 35),
            MazeSize::Huge => (51, 51),
            MazeSize::Custom { width, height } => (width, height),
        }
    }
}

/// Error reading or writing a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings file: {e}"),
            Self::Json(e) => write!(f, "settings format: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maze size preset
    pub maze_size: MazeSize,
    /// Fixed maze seed (random per session when unset)
    pub seed: Option<u64>,
    /// Hand-drawn map file (`#` wall, `.` floor) played instead of a generated maze
    pub map_path: Option<PathBuf>,

    // === View ===
    /// How many tiles the player can see
    pub vision_range: i32,
    /// Horizontal field of view (radians)
    pub fov: f32,
    /// Rays cast per frame (one wall strip each)
    pub ray_count: u32,
    /// Screen size in pixels
    pub screen_width: u32,
    pub screen_height: u32,
    /// World units per maze tile
    pub tile_size: f32,
    /// Show the overhead map at start
    pub show_minimap: bool,

    // === Movement (reference units per tick) ===
    pub move_speed: f32,
    /// Radians per tick while a turn key is held
    pub turn_speed: f32,
    /// Collision radius of the player disc
    pub player_radius: f32,

    // === Rules ===
    /// Fraction of floor that must be seen to win
    pub win_exploration: f64,
    /// Points per explored tile
    pub points_per_tile: u64,
    /// Seconds of time bonus at start, counting down
    pub time_budget_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maze_size: MazeSize::Medium,
            seed: None,
            map_path: None,

            vision_range: 6,
            fov: std::f32::consts::FRAC_PI_3,
            ray_count: 120,
            screen_width: 960,
            screen_height: 480,
            tile_size: 64.0,
            show_minimap: false,

            move_speed: 1.5,
            turn_speed: 0.05,
            player_radius: 8.0,

            win_exploration: 0.8,
            points_per_tile: 10,
            time_budget_secs: 1000,
        }
    }
}

impl Settings {
    /// Create settings from a maze size preset
    pub fn from_preset(maze_size: MazeSize) -> Self {
        Self {
            maze_size,
            ..Self::default()
        }
    }

    /// Clamp values a hand-edited file could break
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.vision_range = self.vision_range.max(0);
        self.ray_count = self.ray_count.clamp(1, MAX_RAY_COUNT);
        self.screen_width = self.screen_width.max(2);
        self.screen_height = self.screen_height.max(1);
        if !(self.fov > 0.0 && self.fov < PI) {
            self.fov = defaults.fov;
        }
        if !(self.tile_size > 0.0) {
            self.tile_size = defaults.tile_size;
        }
        if !self.tile_size.is_finite() {
            self.tile_size = defaults.tile_size;
        }
        self.player_radius = finite_or(self.player_radius, defaults.player_radius).clamp(0.0, MAX_PLAYER_RADIUS);
        self.move_speed = finite_or(self.move_speed, defaults.move_speed).clamp(0.0, MAX_MOVE_SPEED);
        self.turn_speed = finite_or(self.turn_speed, defaults.turn_speed).clamp(0.0, PI);
        self.win_exploration = if self.win_exploration.is_finite() {
            self.win_exploration.clamp(0.0, 1.0)
        } else {
            defaults.win_exploration
        };
        self
    }

    /// Read settings from a JSON file
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Write settings as pretty JSON
    pub fn write(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings, logging instead of failing
    pub fn save(&self, path: &Path) {
        match self.write(path) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(MazeSize::from_str("SMALL"), Some(MazeSize::Small));
        assert_eq!(MazeSize::from_str("med"), Some(MazeSize::Medium));
        assert_eq!(
            MazeSize::from_str("41x31"),
            Some(MazeSize::Custom {
                width: 41,
                height: 31
            })
        );
        assert_eq!(MazeSize::from_str("giant"), None);
        assert_eq!(MazeSize::Huge.dimensions(), (51, 51));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "maze_size": "Small", "vision_range": 4 }"#).unwrap();
        assert_eq!(settings.maze_size, MazeSize::Small);
        assert_eq!(settings.vision_range, 4);
        assert_eq!(settings.ray_count, 120);
        assert!((settings.win_exploration - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let settings = Settings {
            ray_count: 0,
            fov: -1.0,
            tile_size: 0.0,
            win_exploration: 3.0,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.ray_count, 1);
        assert_eq!(settings.fov, Settings::default().fov);
        assert_eq!(settings.tile_size, 64.0);
        assert_eq!(settings.win_exploration, 1.0);
    }

    #[test]
    fn test_sanitize_bounds_movement() {
        let settings: Settings = serde_json::from_str(
            r#"{ "turn_speed": 1e30, "move_speed": -4.0, "player_radius": 1e9, "win_exploration": 2.0 }"#,
        )
        .unwrap();
        let settings = settings.sanitized();
        assert_eq!(settings.turn_speed, PI);
        assert_eq!(settings.move_speed, 0.0);
        assert_eq!(settings.player_radius, MAX_PLAYER_RADIUS);
        assert_eq!(settings.win_exploration, 1.0);

        let settings = Settings {
            move_speed: f32::NAN,
            turn_speed: f32::INFINITY,
            ray_count: u32::MAX,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.move_speed, 1.5);
        assert_eq!(settings.turn_speed, 0.05);
        assert_eq!(settings.ray_count, MAX_RAY_COUNT);
    }

    #[test]
    fn test_map_path_round_trips() {
        let settings: Settings = serde_json::from_str(r#"{ "map_path": "custom_map.txt" }"#).unwrap();
        assert_eq!(settings.map_path, Some(PathBuf::from("custom_map.txt")));
        assert_eq!(Settings::default().map_path, None);
    }

    #[test]
    fn test_file_round_trip_and_missing_file() {
        let dir = std::env::temp_dir().join(format!("maze-explorer-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let settings = Settings {
            seed: Some(99),
            ..Settings::from_preset(MazeSize::Large)
        };
        settings.write(&path).unwrap();
        assert_eq!(Settings::read(&path).unwrap(), settings);

        let missing = Settings::load(&dir.join("nope.json"));
        assert_eq!(missing, Settings::default());

        fs::remove_dir_all(&dir).unwrap();
    }
}
