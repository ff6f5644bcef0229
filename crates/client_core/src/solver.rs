use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{Algorithm, Grid, Position},
    protocol::{SolveRequest, SolveResponse, SolveStatus},
};
use tracing::{debug, info};

use crate::error::SolveError;

/// Remote pathfinding capability. This crate never searches on its own.
#[async_trait]
pub trait SolverTransport: Send + Sync {
    async fn solve(&self, request: &SolveRequest) -> Result<SolveResponse>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Found {
        visited: Vec<Position>,
        path: Vec<Position>,
    },
    NotFound {
        visited: Vec<Position>,
    },
    /// The solver refused the input and said why.
    Rejected {
        message: String,
    },
}

impl SolveOutcome {
    pub fn visited(&self) -> &[Position] {
        match self {
            SolveOutcome::Found { visited, .. } | SolveOutcome::NotFound { visited } => visited,
            SolveOutcome::Rejected { .. } => &[],
        }
    }

    pub fn path(&self) -> Option<&[Position]> {
        match self {
            SolveOutcome::Found { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Single-flight front for the solver: while one request is outstanding,
/// every other request is refused with [`SolveError::Busy`].
pub struct SolveOrchestrator {
    transport: Arc<dyn SolverTransport>,
    in_flight: AtomicBool,
}

impl SolveOrchestrator {
    pub fn new(transport: Arc<dyn SolverTransport>) -> Self {
        Self {
            transport,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn request(
        &self,
        grid: &Grid,
        algorithm: Algorithm,
    ) -> std::result::Result<SolveOutcome, SolveError> {
        let _flight = FlightGuard::acquire(&self.in_flight).ok_or(SolveError::Busy)?;

        let request = SolveRequest {
            maze: grid.clone(),
            algorithm,
        };
        debug!(%algorithm, rows = grid.rows(), cols = grid.cols(), "requesting solve");
        let response = self
            .transport
            .solve(&request)
            .await
            .map_err(SolveError::Transport)?;

        let outcome = match response {
            SolveResponse::Failed { error } => SolveOutcome::Rejected { message: error },
            SolveResponse::Completed {
                status: SolveStatus::Success,
                visited,
                path: Some(path),
            } => SolveOutcome::Found { visited, path },
            SolveResponse::Completed {
                status: SolveStatus::Success,
                path: None,
                ..
            } => {
                return Err(SolveError::MalformedResponse(
                    "success reported without a path".into(),
                ))
            }
            SolveResponse::Completed {
                status: SolveStatus::NotFound,
                visited,
                ..
            } => SolveOutcome::NotFound { visited },
        };

        info!(
            %algorithm,
            visited = outcome.visited().len(),
            path = ?outcome.path().map(<[Position]>::len),
            "solve finished"
        );
        Ok(outcome)
    }
}

struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "tests/solver_tests.rs"]
mod tests;
