//! Fakes shared by the unit tests.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{Grid, Position},
    protocol::{ScoreRecord, SolveRequest, SolveResponse},
};
use tokio::sync::{Mutex, Notify};

use crate::{
    catalog::LevelSource,
    leaderboard::{RankedScore, ScoreStore},
    render::{Counter, Marker, Renderer},
    solver::SolverTransport,
};

pub(crate) fn grid(rows: &[&str]) -> Grid {
    Grid::parse(rows).expect("grid")
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RenderEvent {
    Grid,
    Mark(Position, Marker),
    Counter(Counter, String),
    Status(String),
    Notify(String),
    Leaderboard(Vec<RankedScore>),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    pub(crate) fn marks(&self, marker: Marker) -> Vec<Position> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Mark(pos, m) if *m == marker => Some(*pos),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn counter_values(&self, counter: Counter) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Counter(c, value) if *c == counter => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_counter(&self, counter: Counter) -> Option<String> {
        self.counter_values(counter).pop()
    }

    pub(crate) fn last_status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            RenderEvent::Status(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub(crate) fn notifications(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Notify(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_leaderboard(&self) -> Option<&[RankedScore]> {
        self.events.iter().rev().find_map(|event| match event {
            RenderEvent::Leaderboard(entries) => Some(entries.as_slice()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn render_grid(&mut self, _grid: &Grid) {
        self.events.push(RenderEvent::Grid);
    }

    fn mark_cell(&mut self, position: Position, marker: Marker) {
        self.events.push(RenderEvent::Mark(position, marker));
    }

    fn update_counter(&mut self, counter: Counter, value: &str) {
        self.events
            .push(RenderEvent::Counter(counter, value.to_string()));
    }

    fn set_status(&mut self, status: &str) {
        self.events.push(RenderEvent::Status(status.to_string()));
    }

    fn notify(&mut self, message: &str) {
        self.events.push(RenderEvent::Notify(message.to_string()));
    }

    fn render_leaderboard(&mut self, entries: &[RankedScore]) {
        self.events.push(RenderEvent::Leaderboard(entries.to_vec()));
    }
}

pub(crate) struct StaticLevels {
    levels: Option<Vec<Grid>>,
}

impl StaticLevels {
    pub(crate) fn ok(levels: Vec<Grid>) -> Self {
        Self {
            levels: Some(levels),
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self { levels: None }
    }
}

#[async_trait]
impl LevelSource for StaticLevels {
    async fn fetch_levels(&self) -> Result<Vec<Grid>> {
        self.levels
            .clone()
            .ok_or_else(|| anyhow!("connection refused"))
    }
}

pub(crate) struct ScriptedSolver {
    response: std::result::Result<SolveResponse, String>,
    gate: Option<Arc<Notify>>,
    pub(crate) requests: Mutex<Vec<SolveRequest>>,
}

impl ScriptedSolver {
    pub(crate) fn responding(response: SolveResponse) -> Self {
        Self {
            response: Ok(response),
            gate: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            gate: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Holds every response until `gate` is notified.
    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl SolverTransport for ScriptedSolver {
    async fn solve(&self, request: &SolveRequest) -> Result<SolveResponse> {
        self.requests.lock().await.push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.response.clone().map_err(|err| anyhow!(err))
    }
}

#[derive(Default)]
pub(crate) struct MemoryScores {
    pub(crate) records: Mutex<Vec<ScoreRecord>>,
    fail_list: bool,
    fail_submit: bool,
}

impl MemoryScores {
    pub(crate) fn with_records(records: Vec<ScoreRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            fail_list: true,
            fail_submit: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ScoreStore for MemoryScores {
    async fn list_scores(&self) -> Result<Vec<ScoreRecord>> {
        if self.fail_list {
            return Err(anyhow!("leaderboard unreachable"));
        }
        Ok(self.records.lock().await.clone())
    }

    async fn submit_score(&self, record: &ScoreRecord) -> Result<()> {
        if self.fail_submit {
            return Err(anyhow!("leaderboard unreachable"));
        }
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}
