use std::{cmp::Ordering, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use shared::protocol::ScoreRecord;
use tracing::{debug, warn};

use crate::error::LeaderboardError;

/// Remote score store.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn list_scores(&self) -> Result<Vec<ScoreRecord>>;
    async fn submit_score(&self, record: &ScoreRecord) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedScore {
    /// 1-based display rank.
    pub rank: usize,
    pub record: ScoreRecord,
}

/// Orders records by level descending, then time ascending. Ties keep their
/// input order.
pub fn rank(mut records: Vec<ScoreRecord>) -> Vec<RankedScore> {
    records.sort_by(compare);
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| RankedScore {
            rank: idx + 1,
            record,
        })
        .collect()
}

fn compare(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.level
        .cmp(&a.level)
        .then_with(|| a.time.total_cmp(&b.time))
}

pub struct LeaderboardRanker {
    store: Arc<dyn ScoreStore>,
}

impl LeaderboardRanker {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    pub async fn submit(&self, record: &ScoreRecord) -> Result<(), LeaderboardError> {
        record.validate().map_err(LeaderboardError::InvalidRecord)?;
        self.store
            .submit_score(record)
            .await
            .map_err(LeaderboardError::Store)?;
        debug!(name = %record.name, level = record.level, time = record.time, "score submitted");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        self.store.list_scores().await.map_err(LeaderboardError::Store)
    }

    /// Ranked view of the store. An unreachable store yields an empty board.
    pub async fn standings(&self) -> Vec<RankedScore> {
        match self.list().await {
            Ok(records) => rank(records),
            Err(error) => {
                warn!(%error, "failed to load leaderboard; showing empty board");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/leaderboard_tests.rs"]
mod tests;
