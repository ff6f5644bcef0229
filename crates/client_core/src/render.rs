use shared::domain::{Grid, Position};

use crate::leaderboard::RankedScore;

pub const STATUS_READY: &str = "Ready";
pub const STATUS_SOLVING: &str = "Solving...";
pub const STATUS_SOLVED: &str = "Solved!";
pub const STATUS_NO_PATH: &str = "No Path Found";
pub const STATUS_ERROR: &str = "Error";
pub const STATUS_MOVING: &str = "Moving...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Visited,
    Path,
    /// At most one cell carries the player marker; marking a new cell moves it.
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Visited,
    Path,
    Timer,
}

/// Visual surface driven by the engine.
pub trait Renderer {
    /// Redraws the base grid, dropping every marker.
    fn render_grid(&mut self, grid: &Grid);
    fn mark_cell(&mut self, position: Position, marker: Marker);
    fn update_counter(&mut self, counter: Counter, value: &str);
    fn set_status(&mut self, status: &str);
    /// Blocking, user-facing notification.
    fn notify(&mut self, message: &str);
    fn render_leaderboard(&mut self, entries: &[RankedScore]);
}

/// Fresh board: base grid, zeroed search counters, `Ready` status.
pub(crate) fn redraw(grid: &Grid, renderer: &mut dyn Renderer) {
    renderer.render_grid(grid);
    renderer.update_counter(Counter::Visited, "0");
    renderer.update_counter(Counter::Path, "0");
    renderer.set_status(STATUS_READY);
}
