//! Achievements earned from finished sessions

use serde::{Deserialize, Serialize};

use crate::results::GameResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    /// Complete a maze
    FirstSteps,
    /// Complete a maze in under a minute
    SpeedRunner,
    /// See every floor tile of a maze
    Explorer,
    /// Score over 1000 in one game
    HighScorer,
    /// Play ten games
    Persistent,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstSteps,
        Achievement::SpeedRunner,
        Achievement::Explorer,
        Achievement::HighScorer,
        Achievement::Persistent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::FirstSteps => "First Steps",
            Achievement::SpeedRunner => "Speed Runner",
            Achievement::Explorer => "Explorer",
            Achievement::HighScorer => "High Scorer",
            Achievement::Persistent => "Persistent",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstSteps => "Complete your first maze",
            Achievement::SpeedRunner => "Complete a maze in under 60 seconds",
            Achievement::Explorer => "Explore 100% of a maze",
            Achievement::HighScorer => "Score over 1000 points in a single game",
            Achievement::Persistent => "Play 10 games",
        }
    }
}

/// Lifetime counters kept by whoever stores results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_completed: u32,
}

impl PlayerStats {
    /// Fold a finished session into the counters
    pub fn record(&mut self, result: &GameResult) {
        self.games_played += 1;
        if result.completed {
            self.games_completed += 1;
        }
    }

    fn meets(&self, achievement: Achievement, result: &GameResult) -> bool {
        match achievement {
            Achievement::FirstSteps => self.games_completed >= 1,
            Achievement::SpeedRunner => result.completed && result.completion_time_seconds < 60.0,
            Achievement::Explorer => result.exploration_percentage >= 1.0,
            Achievement::HighScorer => result.score > 1000,
            Achievement::Persistent => self.games_played >= 10,
        }
    }
}

/// Achievements satisfied after `result` has been folded into `stats`
pub fn earned(stats: &PlayerStats, result: &GameResult) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| stats.meets(*a, result))
        .collect()
}
