//! Maze Explorer - headless demo
//!
//! Runs one autopilot session on the configured maze, composing a frame per
//! simulated second, and hands the result to the JSON result file.
//!
//! Usage: `maze-explorer [small|medium|large|huge|WxH] [seed] [--map FILE]`

use std::fs;
use std::path::Path;

use maze_explorer::achievements::{self, PlayerStats};
use maze_explorer::consts::TICK_HZ;
use maze_explorer::renderer::vertex::colors;
use maze_explorer::renderer::{FrameLayout, build_frame};
use maze_explorer::results::{JsonFileSink, deliver};
use maze_explorer::sim::{FixedStep, GameEvent, GamePhase, GameState, Grid, TickInput, tick};
use maze_explorer::{MazeSize, Settings, Tuning};

const SETTINGS_FILE: &str = "maze_settings.json";
const STATS_FILE: &str = "player_stats.json";
/// Give up after this much simulated time (seconds)
const SESSION_LIMIT_SECS: u64 = 900;
/// Host frame length the demo pretends to run at
const HOST_FRAME_DT: f32 = 1.0 / 60.0;

fn load_stats(path: &Path) -> PlayerStats {
    fs::read_to_string(path)
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

fn save_stats(path: &Path, stats: &PlayerStats) {
    let written = serde_json::to_string_pretty(stats)
        .map_err(|e| e.to_string())
        .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
    if let Err(e) = written {
        log::warn!("Could not save player stats: {}", e);
    }
}

fn main() {
    env_logger::init();
    log::info!("Maze Explorer (headless) starting...");

    let settings_path = Path::new(SETTINGS_FILE);
    let mut settings = Settings::load(settings_path);
    if !settings_path.exists() {
        // Leave an editable copy of the defaults behind
        settings.save(settings_path);
    }

    let mut positional = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--map" {
            settings.map_path = args.next().map(Into::into);
        } else {
            positional.push(arg);
        }
    }
    let mut positional = positional.into_iter();
    if let Some(size) = positional.next() {
        match MazeSize::from_str(&size) {
            Some(maze_size) => settings.maze_size = maze_size,
            None => log::warn!("Unknown maze size '{}', using {}", size, settings.maze_size.as_str()),
        }
    }
    let seed = positional
        .next()
        .and_then(|s| s.parse().ok())
        .or(settings.seed)
        .unwrap_or_else(rand::random);

    let tuning = Tuning::from_settings(&settings);
    let layout = FrameLayout::from_settings(&settings);
    let map = settings.map_path.as_deref().and_then(|path| match Grid::read(path) {
        Ok(grid) => Some(grid),
        Err(e) => {
            log::warn!("Cannot play {}: {}, generating a maze instead", path.display(), e);
            None
        }
    });
    let mut state = match map {
        Some(grid) => GameState::with_map(grid, &settings, &tuning, seed),
        None => GameState::from_settings(&settings, &tuning, seed),
    };
    log::info!("Game initialized with seed: {}", seed);

    let mut clock = FixedStep::new();
    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut sink = JsonFileSink::default();
    let mut stats = load_stats(Path::new(STATS_FILE));
    let mut last_report = 0;

    state.start();
    while !state.phase.is_over() {
        for _ in 0..clock.advance(HOST_FRAME_DT) {
            tick(&mut state, &input, &tuning);
            input.clear_one_shots();
        }

        let secs = state.time_ticks / TICK_HZ as u64;
        if secs > last_report {
            last_report = secs;
            let frame = build_frame(&state, &tuning, &layout);
            let batch = frame.instances();
            log::debug!(
                "{} draw instances ({} bytes), {} vertices unbatched",
                batch.len(),
                bytemuck::cast_slice::<_, u8>(&batch).len(),
                frame.vertices().len()
            );
            if secs % 10 == 0 {
                let status: Vec<&str> = frame
                    .hud
                    .iter()
                    .filter(|line| line.color == colors::HUD_TEXT)
                    .map(|line| line.text.as_str())
                    .collect();
                log::info!("{}", status.join(" | "));
            }
            if secs >= SESSION_LIMIT_SECS {
                input.quit = true;
            }
        }

        for event in state.drain_events() {
            if let GameEvent::SessionEnded(result) = event {
                if deliver(&mut sink, &result) {
                    log::info!("Result written to {}", sink.path().display());
                }
                stats.record(&result);
                for achievement in achievements::earned(&stats, &result) {
                    log::info!("Achievement: {} - {}", achievement.name(), achievement.description());
                }
            }
        }
    }

    save_stats(Path::new(STATS_FILE), &stats);
    match state.phase {
        GamePhase::Won => log::info!("Maze explored in {:.1}s", state.elapsed_secs()),
        _ => log::info!("Session ended early"),
    }
}
