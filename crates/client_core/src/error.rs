use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("a solve is already in progress")]
    Busy,
    #[error("solver request failed: {0:#}")]
    Transport(anyhow::Error),
    #[error("malformed solver response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("an animation is already playing")]
    Busy,
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("invalid score record: {0}")]
    InvalidRecord(String),
    #[error("leaderboard store unavailable: {0:#}")]
    Store(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("player name must not be empty")]
    EmptyPlayerName,
    #[error("moves are only accepted in play mode")]
    NotPlaying,
    #[error("solving is only available in visualize mode")]
    NotVisualizing,
    #[error("a solve or animation is already running")]
    Busy,
    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl From<AnimationError> for ControllerError {
    fn from(value: AnimationError) -> Self {
        match value {
            AnimationError::Busy => ControllerError::Busy,
        }
    }
}
