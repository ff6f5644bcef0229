use std::sync::Arc;

use shared::{
    domain::Grid,
    error::{ApiError, ErrorCode},
    protocol::{ScoreRecord, SubmitScoreResponse},
};
use tracing::info;

use crate::scores::ScoreBoard;

#[derive(Clone)]
pub struct ApiContext {
    pub levels: Arc<Vec<Grid>>,
    pub scores: Arc<ScoreBoard>,
}

pub fn list_levels(ctx: &ApiContext) -> Vec<Grid> {
    ctx.levels.as_ref().clone()
}

/// Stored records in insertion order; ranking is the client's job.
pub async fn list_scores(ctx: &ApiContext) -> Vec<ScoreRecord> {
    ctx.scores.list().await
}

pub async fn submit_score(
    ctx: &ApiContext,
    record: ScoreRecord,
) -> Result<SubmitScoreResponse, ApiError> {
    record
        .validate()
        .map_err(|message| ApiError::new(ErrorCode::Validation, message))?;
    info!(name = %record.name, level = record.level, time = record.time, "score saved");
    ctx.scores.append(record).await;
    Ok(SubmitScoreResponse {
        status: "saved".into(),
    })
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
