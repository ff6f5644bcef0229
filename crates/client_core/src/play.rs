use std::time::Instant;

use shared::domain::{CellKind, Delta, Position};
use tracing::{debug, info};

use crate::{
    grid::GridModel,
    render::{redraw, Counter, Marker, Renderer},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStatus {
    /// Positioned on the start cell, timer not started.
    Idle,
    Running,
    /// Terminal for the current level.
    Won,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Position,
    pub running_since: Option<Instant>,
    /// Last value sampled by a timer tick.
    pub elapsed_seconds: f64,
    pub status: PlayStatus,
}

impl PlayerState {
    fn idle_at(position: Position) -> Self {
        Self {
            position,
            running_since: None,
            elapsed_seconds: 0.0,
            status: PlayStatus::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Target outside the grid or a wall; nothing changed.
    Blocked,
    Moved {
        position: Position,
        timer_started: bool,
    },
    Won {
        position: Position,
        elapsed_seconds: f64,
    },
    /// The level is already won; moves are ignored until the next reset.
    Finished,
}

/// Interactive play state machine: Idle -> Running -> Won.
#[derive(Debug, Clone)]
pub struct PlayModeEngine {
    state: PlayerState,
}

impl PlayModeEngine {
    pub fn new(grid: &GridModel) -> Self {
        Self {
            state: PlayerState::idle_at(grid.locate(CellKind::Start)),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn is_timer_running(&self) -> bool {
        self.state.running_since.is_some()
    }

    /// Back to Idle on the start cell with a stopped, zeroed timer, and a
    /// freshly drawn board.
    pub fn reset(&mut self, grid: &GridModel, renderer: &mut dyn Renderer) {
        self.stop_timer();
        self.state = PlayerState::idle_at(grid.locate(CellKind::Start));
        renderer.update_counter(Counter::Timer, &format_clock(0.0));
        redraw(grid.grid(), renderer);
        renderer.mark_cell(self.state.position, Marker::Player);
        debug!(position = %self.state.position, "player reset");
    }

    pub fn move_player(
        &mut self,
        delta: Delta,
        grid: &GridModel,
        now: Instant,
        renderer: &mut dyn Renderer,
    ) -> MoveOutcome {
        if self.state.status == PlayStatus::Won {
            return MoveOutcome::Finished;
        }

        let Some(target) = self
            .state
            .position
            .offset(delta)
            .filter(|pos| grid.is_walkable(*pos))
        else {
            return MoveOutcome::Blocked;
        };

        let timer_started = self.start_timer(now);
        self.state.position = target;
        renderer.mark_cell(target, Marker::Player);

        if grid.kind_at(target) == Some(CellKind::Goal) {
            self.stop_timer();
            self.state.status = PlayStatus::Won;
            info!(
                position = %target,
                elapsed_seconds = self.state.elapsed_seconds,
                "goal reached"
            );
            return MoveOutcome::Won {
                position: target,
                elapsed_seconds: self.state.elapsed_seconds,
            };
        }

        MoveOutcome::Moved {
            position: target,
            timer_started,
        }
    }

    /// Periodic timer tick: samples wall-clock elapsed time since the run
    /// started. No-op while the timer is stopped.
    pub fn tick(&mut self, now: Instant, renderer: &mut dyn Renderer) -> Option<f64> {
        let since = self.state.running_since?;
        let elapsed = now.saturating_duration_since(since).as_secs_f64();
        self.state.elapsed_seconds = elapsed;
        renderer.update_counter(Counter::Timer, &format_clock(elapsed));
        Some(elapsed)
    }

    pub fn stop_timer(&mut self) {
        self.state.running_since = None;
    }

    fn start_timer(&mut self, now: Instant) -> bool {
        if self.state.running_since.is_some() {
            return false;
        }
        self.state.running_since = Some(now);
        self.state.status = PlayStatus::Running;
        true
    }
}

/// `MM:SS` from whole elapsed seconds.
pub fn format_clock(elapsed_seconds: f64) -> String {
    let whole = elapsed_seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
#[path = "tests/play_tests.rs"]
mod tests;
