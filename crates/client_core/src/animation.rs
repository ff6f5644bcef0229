//! Stepwise replay of a solver trace.
//!
//! A [`Playback`] is a plain iterator over [`AnimationStep`]s: every visited
//! cell in input order, then every path cell in input order. The
//! [`AnimationSequencer`] owns at most one playback at a time, applies each
//! step to the renderer, and refuses to start a second one while the first is
//! still running. Callers either drive it themselves with
//! [`AnimationSequencer::advance`] from a scheduler tick, or hand it a
//! [`Clock`] and await [`AnimationSequencer::play`].

use std::time::Duration;

use shared::domain::{CellKind, Position};
use tracing::debug;

use crate::{
    clock::Clock,
    error::AnimationError,
    grid::GridModel,
    render::{Counter, Marker, Renderer},
};

pub const MIN_SPEED: u16 = 10;
pub const MAX_SPEED: u16 = 500;
pub const DEFAULT_SPEED: u16 = 400;
const DELAY_BASE_MS: u16 = 510;

/// Slider position; higher is faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpeed(u16);

impl AnimationSpeed {
    pub fn new(value: u16) -> Self {
        Self(value.clamp(MIN_SPEED, MAX_SPEED))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn step_delay(self) -> Duration {
        Duration::from_millis(u64::from(DELAY_BASE_MS - self.0))
    }
}

impl Default for AnimationSpeed {
    fn default() -> Self {
        Self(DEFAULT_SPEED)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    /// `count` is the visited counter after this step.
    Visited { position: Position, count: usize },
    /// `count` is the path counter after this step.
    Path { position: Position, count: usize },
}

impl AnimationStep {
    pub fn position(self) -> Position {
        match self {
            AnimationStep::Visited { position, .. } | AnimationStep::Path { position, .. } => {
                position
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Visiting,
    Tracing,
    Done,
}

#[derive(Debug, Clone)]
pub struct Playback {
    visited: Vec<Position>,
    path: Option<Vec<Position>>,
    phase: PlaybackPhase,
    cursor: usize,
}

impl Playback {
    pub fn new(visited: Vec<Position>, path: Option<Vec<Position>>) -> Self {
        Self {
            visited,
            path,
            phase: PlaybackPhase::Visiting,
            cursor: 0,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn visited_count(&self) -> usize {
        match self.phase {
            PlaybackPhase::Visiting => self.cursor,
            PlaybackPhase::Tracing | PlaybackPhase::Done => self.visited.len(),
        }
    }

    pub fn path_count(&self) -> usize {
        match self.phase {
            PlaybackPhase::Visiting => 0,
            PlaybackPhase::Tracing => self.cursor,
            PlaybackPhase::Done => self.path.as_ref().map_or(0, Vec::len),
        }
    }
}

impl Iterator for Playback {
    type Item = AnimationStep;

    fn next(&mut self) -> Option<AnimationStep> {
        loop {
            match self.phase {
                PlaybackPhase::Visiting => match self.visited.get(self.cursor) {
                    Some(&position) => {
                        self.cursor += 1;
                        return Some(AnimationStep::Visited {
                            position,
                            count: self.cursor,
                        });
                    }
                    None => {
                        self.phase = PlaybackPhase::Tracing;
                        self.cursor = 0;
                    }
                },
                PlaybackPhase::Tracing => {
                    match self.path.as_ref().and_then(|path| path.get(self.cursor)) {
                        Some(&position) => {
                            self.cursor += 1;
                            return Some(AnimationStep::Path {
                                position,
                                count: self.cursor,
                            });
                        }
                        None => self.phase = PlaybackPhase::Done,
                    }
                }
                PlaybackPhase::Done => return None,
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct AnimationSequencer {
    playback: Option<Playback>,
}

impl AnimationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True from [`start`](Self::start) until `advance` reports exhaustion.
    pub fn is_busy(&self) -> bool {
        self.playback.is_some()
    }

    pub fn playback(&self) -> Option<&Playback> {
        self.playback.as_ref()
    }

    pub fn start(
        &mut self,
        visited: Vec<Position>,
        path: Option<Vec<Position>>,
    ) -> Result<(), AnimationError> {
        if self.is_busy() {
            return Err(AnimationError::Busy);
        }
        debug!(
            visited = visited.len(),
            path = ?path.as_ref().map(Vec::len),
            "animation started"
        );
        self.playback = Some(Playback::new(visited, path));
        Ok(())
    }

    /// Applies the next step. Returns `None` once the playback is exhausted,
    /// at which point the sequencer is idle again.
    pub fn advance(
        &mut self,
        grid: &GridModel,
        renderer: &mut dyn Renderer,
    ) -> Option<AnimationStep> {
        let playback = self.playback.as_mut()?;
        match playback.next() {
            Some(step) => {
                apply_step(step, grid, renderer);
                Some(step)
            }
            None => {
                self.playback = None;
                debug!("animation finished");
                None
            }
        }
    }

    /// Drops the current playback without applying the remaining steps.
    pub(crate) fn abandon(&mut self) {
        if self.playback.take().is_some() {
            debug!("animation abandoned");
        }
    }

    /// Plays `visited` then `path` to completion, waiting `delay` after each
    /// step. Returns the number of steps applied.
    pub async fn play(
        &mut self,
        grid: &GridModel,
        visited: Vec<Position>,
        path: Option<Vec<Position>>,
        delay: Duration,
        renderer: &mut dyn Renderer,
        clock: &dyn Clock,
    ) -> Result<usize, AnimationError> {
        self.start(visited, path)?;
        let mut steps = 0;
        while self.advance(grid, renderer).is_some() {
            steps += 1;
            clock.sleep(delay).await;
        }
        Ok(steps)
    }
}

fn apply_step(step: AnimationStep, grid: &GridModel, renderer: &mut dyn Renderer) {
    let (position, marker, counter, count) = match step {
        AnimationStep::Visited { position, count } => {
            (position, Marker::Visited, Counter::Visited, count)
        }
        AnimationStep::Path { position, count } => (position, Marker::Path, Counter::Path, count),
    };

    match grid.kind_at(position) {
        Some(CellKind::Start | CellKind::Goal) => {}
        Some(_) => renderer.mark_cell(position, marker),
        None => debug!(%position, "step outside the grid; not marked"),
    }
    renderer.update_counter(counter, &count.to_string());
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
