//! Maze game engine.
//!
//! A [`ModeController`] owns the application state (active grid, mode, player
//! name, level index) and drives the components below through explicit
//! references to that state:
//!
//! * [`GridModel`] answers structural queries about the active grid.
//! * [`LevelCatalog`] hands out copies of the ordered level list.
//! * [`SolveOrchestrator`] asks the external solver for a visitation trace.
//! * [`AnimationSequencer`] replays a trace one step at a time.
//! * [`PlayModeEngine`] runs interactive play: moves, timer, win detection.
//! * [`LeaderboardRanker`] submits and orders score records.
//!
//! Rendering, time and networking are capabilities injected through the
//! [`Renderer`], [`Clock`], [`LevelSource`], [`SolverTransport`] and
//! [`ScoreStore`] traits. [`transport::HttpBackend`] implements the network
//! traits over HTTP.

pub mod animation;
pub mod catalog;
pub mod clock;
pub mod controller;
pub mod error;
pub mod grid;
pub mod leaderboard;
pub mod play;
pub mod render;
pub mod solver;
pub mod transport;

pub use animation::{AnimationSequencer, AnimationSpeed, AnimationStep, Playback, PlaybackPhase};
pub use catalog::{Level, LevelCatalog, LevelSource};
pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{AppState, Collaborators, LevelProgress, Mode, ModeController, MoveReport};
pub use error::{AnimationError, ControllerError, LeaderboardError, SolveError};
pub use grid::GridModel;
pub use leaderboard::{rank, LeaderboardRanker, RankedScore, ScoreStore};
pub use play::{format_clock, MoveOutcome, PlayModeEngine, PlayStatus, PlayerState};
pub use render::{Counter, Marker, Renderer};
pub use solver::{SolveOrchestrator, SolveOutcome, SolverTransport};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
