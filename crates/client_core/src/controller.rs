use std::{sync::Arc, time::Duration};

use shared::{
    domain::{Algorithm, Direction},
    protocol::ScoreRecord,
};
use tracing::{error, info, warn};

use crate::{
    animation::{AnimationSequencer, AnimationSpeed, AnimationStep},
    catalog::{Level, LevelCatalog, LevelSource},
    clock::Clock,
    error::{ControllerError, SolveError},
    grid::GridModel,
    leaderboard::{LeaderboardRanker, RankedScore, ScoreStore},
    play::{format_clock, MoveOutcome, PlayModeEngine, PlayerState},
    render::{
        redraw, Renderer, STATUS_ERROR, STATUS_MOVING, STATUS_NO_PATH, STATUS_READY,
        STATUS_SOLVED, STATUS_SOLVING,
    },
    solver::{SolveOrchestrator, SolveOutcome, SolverTransport},
};

pub const ALL_LEVELS_COMPLETE: &str = "You completed all levels! Check the Leaderboard.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Visualize,
    Play,
}

/// External capabilities the controller is wired to.
#[derive(Clone)]
pub struct Collaborators {
    pub levels: Arc<dyn LevelSource>,
    pub solver: Arc<dyn SolverTransport>,
    pub scores: Arc<dyn ScoreStore>,
    pub clock: Arc<dyn Clock>,
}

/// Session state: one value, owned by the controller and lent to components.
#[derive(Debug, Clone)]
pub struct AppState {
    pub grid: GridModel,
    pub mode: Mode,
    pub player_name: String,
    pub level: Level,
    pub speed: AnimationSpeed,
    pending_verdict: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelProgress {
    /// `level` is the 1-based number of the level now loaded.
    Advanced { level: usize },
    AllComplete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    /// Present when the move won the level.
    pub progress: Option<LevelProgress>,
}

pub struct ModeController<R: Renderer> {
    state: AppState,
    catalog: LevelCatalog,
    solver: SolveOrchestrator,
    sequencer: AnimationSequencer,
    engine: PlayModeEngine,
    leaderboard: LeaderboardRanker,
    clock: Arc<dyn Clock>,
    renderer: R,
}

impl<R: Renderer> ModeController<R> {
    /// Starts a session for `player_name`: loads the level list, opens level 1
    /// in play mode and shows the current leaderboard.
    pub async fn start(
        player_name: &str,
        collaborators: Collaborators,
        renderer: R,
    ) -> Result<Self, ControllerError> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(ControllerError::EmptyPlayerName);
        }

        let catalog = LevelCatalog::load_all(collaborators.levels.as_ref()).await;
        let level = catalog.get(0);
        let grid = GridModel::new(&level.grid);
        let engine = PlayModeEngine::new(&grid);

        let mut controller = Self {
            state: AppState {
                grid,
                mode: Mode::Play,
                player_name: player_name.to_string(),
                level,
                speed: AnimationSpeed::default(),
                pending_verdict: None,
            },
            catalog,
            solver: SolveOrchestrator::new(collaborators.solver),
            sequencer: AnimationSequencer::new(),
            engine,
            leaderboard: LeaderboardRanker::new(collaborators.scores),
            clock: collaborators.clock,
            renderer,
        };

        info!(player = %controller.state.player_name, levels = controller.catalog.len(), "session started");
        controller.load_level(0);
        controller.set_mode(Mode::Play);
        controller.refresh_leaderboard().await;
        Ok(controller)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn player(&self) -> &PlayerState {
        self.engine.state()
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn is_animating(&self) -> bool {
        self.sequencer.is_busy()
    }

    pub fn step_delay(&self) -> Duration {
        self.state.speed.step_delay()
    }

    pub fn set_speed(&mut self, value: u16) {
        self.state.speed = AnimationSpeed::new(value);
    }

    /// Loads a fresh copy of level `idx` (wrapping past the end) and resets
    /// play on it.
    pub fn load_level(&mut self, idx: usize) {
        self.sequencer.abandon();
        self.state.pending_verdict = None;
        self.state.level = self.catalog.get(idx);
        self.state.grid.load(&self.state.level.grid);
        info!(level = self.state.level.number(), "level loaded");
        self.engine.reset(&self.state.grid, &mut self.renderer);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.sequencer.abandon();
        self.state.pending_verdict = None;
        match mode {
            Mode::Play => self.engine.reset(&self.state.grid, &mut self.renderer),
            Mode::Visualize => {
                self.engine.stop_timer();
                redraw(self.state.grid.grid(), &mut self.renderer);
            }
        }
        info!(?mode, "mode changed");
    }

    /// Clears the board for the current mode. A running playback is dropped;
    /// in play mode the player returns to Start with a stopped timer.
    pub fn reset(&mut self) {
        self.sequencer.abandon();
        self.state.pending_verdict = None;
        match self.state.mode {
            Mode::Play => self.engine.reset(&self.state.grid, &mut self.renderer),
            Mode::Visualize => redraw(self.state.grid.grid(), &mut self.renderer),
        }
    }

    pub async fn handle_move(&mut self, direction: Direction) -> Result<MoveReport, ControllerError> {
        if self.state.mode != Mode::Play {
            return Err(ControllerError::NotPlaying);
        }

        self.renderer.set_status(STATUS_MOVING);
        let outcome = self.engine.move_player(
            direction.delta(),
            &self.state.grid,
            self.clock.now(),
            &mut self.renderer,
        );

        let progress = match &outcome {
            MoveOutcome::Won {
                elapsed_seconds, ..
            } => Some(self.complete_level(*elapsed_seconds).await),
            _ => None,
        };
        Ok(MoveReport { outcome, progress })
    }

    /// One play-timer tick; only meaningful in play mode.
    pub fn tick_timer(&mut self) -> Option<f64> {
        if self.state.mode != Mode::Play {
            return None;
        }
        self.engine.tick(self.clock.now(), &mut self.renderer)
    }

    /// Asks the solver for a trace of the active grid and, on success, queues
    /// it for playback. Refused while a previous playback is still running.
    pub async fn solve(&mut self, algorithm: Algorithm) -> Result<SolveOutcome, ControllerError> {
        if self.state.mode != Mode::Visualize {
            return Err(ControllerError::NotVisualizing);
        }
        if self.sequencer.is_busy() {
            return Err(ControllerError::Busy);
        }

        redraw(self.state.grid.grid(), &mut self.renderer);
        self.renderer.set_status(STATUS_SOLVING);

        let outcome = match self.solver.request(self.state.grid.grid(), algorithm).await {
            Ok(outcome) => outcome,
            Err(SolveError::Busy) => return Err(ControllerError::Busy),
            Err(err) => {
                error!(%algorithm, error = %err, "solve failed");
                self.renderer.set_status(STATUS_ERROR);
                return Err(err.into());
            }
        };

        match &outcome {
            SolveOutcome::Rejected { message } => {
                warn!(%algorithm, %message, "solver rejected the maze");
                self.renderer.notify(message);
                self.renderer.set_status(STATUS_READY);
            }
            SolveOutcome::Found { visited, path } => {
                self.sequencer.start(visited.clone(), Some(path.clone()))?;
                self.state.pending_verdict = Some(STATUS_SOLVED);
            }
            SolveOutcome::NotFound { visited } => {
                self.sequencer.start(visited.clone(), None)?;
                self.state.pending_verdict = Some(STATUS_NO_PATH);
            }
        }
        Ok(outcome)
    }

    /// Applies the next animation step. When the playback is exhausted the
    /// final verdict is shown and `None` is returned.
    pub fn animation_step(&mut self) -> Option<AnimationStep> {
        let step = self
            .sequencer
            .advance(&self.state.grid, &mut self.renderer);
        if step.is_none() {
            if let Some(verdict) = self.state.pending_verdict.take() {
                self.renderer.set_status(verdict);
            }
        }
        step
    }

    /// Drives the queued playback to completion at the configured speed.
    pub async fn run_animation(&mut self) -> usize {
        let delay = self.step_delay();
        let mut steps = 0;
        while self.animation_step().is_some() {
            steps += 1;
            self.clock.sleep(delay).await;
        }
        steps
    }

    pub async fn refresh_leaderboard(&mut self) -> Vec<RankedScore> {
        let standings = self.leaderboard.standings().await;
        self.renderer.render_leaderboard(&standings);
        standings
    }

    async fn complete_level(&mut self, elapsed_seconds: f64) -> LevelProgress {
        let number = self.state.level.number();
        self.renderer.notify(&format!(
            "You escaped Level {number}! Time: {}",
            format_clock(elapsed_seconds)
        ));

        let record = ScoreRecord::new(
            self.state.player_name.clone(),
            u32::try_from(number).unwrap_or(u32::MAX),
            elapsed_seconds,
        );
        info!(player = %record.name, level = record.level, time = record.time, "level completed");
        if let Err(error) = self.leaderboard.submit(&record).await {
            warn!(%error, "failed to submit score");
        }
        self.refresh_leaderboard().await;

        if self.catalog.has_next(self.state.level.index) {
            self.load_level(self.state.level.index + 1);
            LevelProgress::Advanced {
                level: self.state.level.number(),
            }
        } else {
            self.renderer.notify(ALL_LEVELS_COMPLETE);
            LevelProgress::AllComplete
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
