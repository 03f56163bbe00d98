//! Heads-up text lines for the host to draw

use super::vertex::{Rgba, colors};
use crate::sim::state::GameState;

/// One line of HUD text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudLine {
    pub text: String,
    pub color: Rgba,
}

/// Control legend, drawn along the bottom
pub const CONTROLS: [&str; 5] = [
    "W/S=move  A/D=turn",
    "Q/E=strafe",
    "M=minimap",
    "R=new maze",
    "ESC=quit",
];

/// Status lines, drawn top-left one per row
pub fn status_lines(state: &GameState) -> Vec<String> {
    let explored = state.explored_floor();
    let total = state.floor_total();
    vec![
        format!("Score: {}", state.score),
        format!("Time: {}s", state.elapsed_secs().floor() as u64),
        format!(
            "Explored: {}/{} ({:.1}%)",
            explored,
            total,
            state.exploration_ratio() * 100.0
        ),
        format!("Maze: {}", state.grid.size_label()),
        format!("Minimap: {}", if state.show_minimap { "ON" } else { "OFF" }),
    ]
}

/// Status lines followed by the control legend
pub fn lines(state: &GameState) -> Vec<HudLine> {
    let status = status_lines(state).into_iter().map(|text| HudLine {
        text,
        color: colors::HUD_TEXT,
    });
    let controls = CONTROLS.iter().map(|text| HudLine {
        text: text.to_string(),
        color: colors::HUD_CONTROLS,
    });
    status.chain(controls).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_status_lines() {
        let tuning = Tuning::default();
        let mut state = GameState::new(3, 15, 15, &tuning);
        state.time_ticks = 125;
        state.refresh_exploration(&tuning);
        let lines = status_lines(&state);
        assert_eq!(lines[1], "Time: 2s");
        assert!(lines[2].starts_with(&format!("Explored: {}/{}", state.explored_floor(), state.floor_total())));
        assert!(lines[2].ends_with("%)"));
        assert_eq!(lines[3], "Maze: 15x15");
        assert_eq!(lines[4], "Minimap: OFF");
    }

    #[test]
    fn test_legend_follows_status() {
        let tuning = Tuning::default();
        let state = GameState::new(3, 15, 15, &tuning);
        let hud = lines(&state);
        assert_eq!(hud.len(), 5 + CONTROLS.len());
        assert!(hud[..5].iter().all(|l| l.color == colors::HUD_TEXT));
        assert!(hud[5..].iter().all(|l| l.color == colors::HUD_CONTROLS));
        assert_eq!(hud.last().map(|l| l.text.as_str()), Some("ESC=quit"));
    }
}
