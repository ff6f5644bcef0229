//! reqwest-backed implementations of the network capabilities.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Grid,
    protocol::{
        leaderboard_route, levels_route, solve_maze_route, ScoreRecord, SolveRequest,
        SolveResponse, SubmitScoreResponse,
    },
};
use tracing::debug;
use url::Url;

use crate::{catalog::LevelSource, leaderboard::ScoreStore, solver::SolverTransport};

/// HTTP client for the level/score service and the solver. The solver may
/// live behind a different base URL than the level/score service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    server_url: Url,
    solver_url: Url,
}

impl HttpBackend {
    pub fn new(server_url: &str) -> Result<Self> {
        let server_url = parse_base(server_url)?;
        Ok(Self {
            http: Client::new(),
            solver_url: server_url.clone(),
            server_url,
        })
    }

    pub fn with_solver_url(mut self, solver_url: &str) -> Result<Self> {
        self.solver_url = parse_base(solver_url)?;
        Ok(self)
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    pub fn solver_url(&self) -> &Url {
        &self.solver_url
    }

    fn endpoint(base: &Url, route: &str) -> Result<Url> {
        base.join(route.trim_start_matches('/'))
            .with_context(|| format!("invalid route {route} for {base}"))
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("invalid base url: {raw}"))?;
    if url.cannot_be_a_base() {
        return Err(anyhow!("url cannot be used as a base: {raw}"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl LevelSource for HttpBackend {
    async fn fetch_levels(&self) -> Result<Vec<Grid>> {
        let url = Self::endpoint(&self.server_url, levels_route())?;
        let levels: Vec<Grid> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding level list")?;
        debug!(count = levels.len(), "fetched levels");
        Ok(levels)
    }
}

#[async_trait]
impl SolverTransport for HttpBackend {
    async fn solve(&self, request: &SolveRequest) -> Result<SolveResponse> {
        let url = Self::endpoint(&self.solver_url, solve_maze_route())?;
        let response = self.http.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Refusals arrive as `{"error": ...}` with a 4xx status.
        match serde_json::from_str::<SolveResponse>(&body) {
            Ok(parsed) if status.is_success() || matches!(parsed, SolveResponse::Failed { .. }) => {
                Ok(parsed)
            }
            Ok(_) => Err(anyhow!("solver answered {status}")),
            Err(_) if !status.is_success() => Err(anyhow!("solver answered {status}: {body}")),
            Err(err) => Err(err).context("decoding solver response"),
        }
    }
}

#[async_trait]
impl ScoreStore for HttpBackend {
    async fn list_scores(&self) -> Result<Vec<ScoreRecord>> {
        let url = Self::endpoint(&self.server_url, leaderboard_route())?;
        Ok(self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    async fn submit_score(&self, record: &ScoreRecord) -> Result<()> {
        let url = Self::endpoint(&self.server_url, leaderboard_route())?;
        let body = self
            .http
            .post(url)
            .json(record)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        // The store may answer with a bare 2xx.
        match serde_json::from_str::<SubmitScoreResponse>(&body) {
            Ok(ack) => debug!(status = %ack.status, "score stored"),
            Err(_) => debug!(bytes = body.len(), "score stored without acknowledgement"),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
