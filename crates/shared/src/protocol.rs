use serde::{Deserialize, Serialize};

use crate::domain::{Algorithm, Grid, Position};

pub fn levels_route() -> &'static str {
    "/api/levels"
}

pub fn solve_maze_route() -> &'static str {
    "/api/solve/maze"
}

pub fn leaderboard_route() -> &'static str {
    "/api/leaderboard"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    pub maze: Grid,
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Success,
    NotFound,
}

/// Body returned by the solver. A body carrying `error` wins over every other
/// shape, matching how the solver reports malformed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolveResponse {
    Failed {
        error: String,
    },
    Completed {
        status: SolveStatus,
        visited: Vec<Position>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<Vec<Position>>,
    },
}

/// One completed level. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub level: u32,
    pub time: f64,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, level: u32, time: f64) -> Self {
        Self {
            name: name.into(),
            level,
            time,
        }
    }

    /// Checks the record invariants: non-empty name, positive level and a
    /// finite, non-negative time.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        if self.level == 0 {
            return Err("level must be at least 1".into());
        }
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(format!("time must be a non-negative number, got {}", self.time));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    pub status: String,
}
