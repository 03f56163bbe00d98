//! Session result records
//!
//! When a session ends the controller produces a `GameResult`; whatever keeps
//! score (a file, a leaderboard service) receives it through `ResultSink`.
//! Delivery failures never reach gameplay: `deliver` logs and moves on.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default hand-off file written by `JsonFileSink`
pub const RESULT_FILE: &str = "game_result.json";

/// Outcome of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// Won by exploration (false on quit)
    pub completed: bool,
    pub score: u64,
    pub completion_time_seconds: f64,
    /// Tiles seen, walls included
    pub tiles_explored: usize,
    /// "WxH"
    pub maze_size: String,
    /// Fraction of floor seen (0-1)
    pub exploration_percentage: f64,
}

/// Error handing a result to a sink
#[derive(Debug)]
pub enum SinkError {
    Io(io::Error),
    Encode(serde_json::Error),
    /// Sink refused the record (service down, not signed in, ...)
    Rejected(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "write failed: {e}"),
            Self::Encode(e) => write!(f, "encode failed: {e}"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Rejected(_) => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

/// Receiver for finished-session results
pub trait ResultSink {
    fn submit(&mut self, result: &GameResult) -> Result<(), SinkError>;
}

/// Hand a result to a sink; failures are logged and otherwise ignored
///
/// Returns whether the sink accepted it.
pub fn deliver(sink: &mut dyn ResultSink, result: &GameResult) -> bool {
    match sink.submit(result) {
        Ok(()) => {
            log::info!(
                "Result saved (score {}, {:.1}s, {} tiles)",
                result.score,
                result.completion_time_seconds,
                result.tiles_explored
            );
            true
        }
        Err(e) => {
            log::warn!("Failed to save result: {}", e);
            false
        }
    }
}

/// Writes the latest result as JSON for a launcher to pick up
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back a result written by this sink
    pub fn read(path: &Path) -> Result<GameResult, SinkError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Default for JsonFileSink {
    fn default() -> Self {
        Self::new(RESULT_FILE)
    }
}

impl ResultSink for JsonFileSink {
    fn submit(&mut self, result: &GameResult) -> Result<(), SinkError> {
        let json = serde_json::to_string_pretty(result)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Keeps results in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub results: Vec<GameResult>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&GameResult> {
        self.results.last()
    }

    /// Best score recorded so far
    pub fn top_score(&self) -> Option<u64> {
        self.results.iter().map(|r| r.score).max()
    }
}

impl ResultSink for MemorySink {
    fn submit(&mut self, result: &GameResult) -> Result<(), SinkError> {
        self.results.push(result.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameResult {
        GameResult {
            completed: true,
            score: 1840,
            completion_time_seconds: 95.5,
            tiles_explored: 94,
            maze_size: "25x25".to_string(),
            exploration_percentage: 0.82,
        }
    }

    struct FailingSink;

    impl ResultSink for FailingSink {
        fn submit(&mut self, _result: &GameResult) -> Result<(), SinkError> {
            Err(SinkError::Rejected("offline".to_string()))
        }
    }

    #[test]
    fn test_record_uses_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["completed"], true);
        assert_eq!(json["score"], 1840);
        assert_eq!(json["completionTimeSeconds"], 95.5);
        assert_eq!(json["tilesExplored"], 94);
        assert_eq!(json["mazeSize"], "25x25");
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        assert!(deliver(&mut sink, &sample()));
        let mut second = sample();
        second.score = 2000;
        assert!(deliver(&mut sink, &second));
        assert_eq!(sink.results.len(), 2);
        assert_eq!(sink.top_score(), Some(2000));
        assert_eq!(sink.last(), Some(&second));
    }

    #[test]
    fn test_failed_delivery_is_swallowed() {
        assert!(!deliver(&mut FailingSink, &sample()));
    }

    #[test]
    fn test_json_file_sink_writes_record() {
        let path = std::env::temp_dir().join(format!("maze-explorer-result-{}.json", std::process::id()));
        let mut sink = JsonFileSink::new(&path);
        sink.submit(&sample()).unwrap();
        assert_eq!(JsonFileSink::read(&path).unwrap(), sample());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_json_file_sink_reports_bad_path() {
        let mut sink = JsonFileSink::new(std::env::temp_dir().join("no-such-dir-maze").join("r.json"));
        assert!(matches!(sink.submit(&sample()), Err(SinkError::Io(_))));
    }
}
