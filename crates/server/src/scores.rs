use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use shared::protocol::ScoreRecord;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Leaderboard records in insertion order, optionally mirrored to a JSON
/// file that is rewritten after every append.
pub struct ScoreBoard {
    records: Mutex<Vec<ScoreRecord>>,
    path: Option<PathBuf>,
}

impl ScoreBoard {
    pub fn in_memory() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            path: None,
        }
    }

    /// Opens the board mirrored at `path`. A missing or unreadable file
    /// starts an empty board.
    pub fn open(path: PathBuf) -> Self {
        let records = match read_records(&path) {
            Ok(records) => {
                info!(count = records.len(), path = %path.display(), "leaderboard loaded");
                records
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "starting with an empty leaderboard");
                Vec::new()
            }
        };
        Self {
            records: Mutex::new(records),
            path: Some(path),
        }
    }

    pub async fn list(&self) -> Vec<ScoreRecord> {
        self.records.lock().await.clone()
    }

    /// Appends `record`. The in-memory board stays authoritative when the
    /// mirror file cannot be written.
    pub async fn append(&self, record: ScoreRecord) {
        let mut records = self.records.lock().await;
        records.push(record);
        if let Some(path) = &self.path {
            if let Err(error) = write_records(path, &records) {
                error!(error = %format!("{error:#}"), "failed to persist leaderboard");
            }
        }
    }
}

fn read_records(path: &Path) -> anyhow::Result<Vec<ScoreRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read leaderboard file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid leaderboard file '{}'", path.display()))
}

fn write_records(path: &Path, records: &[ScoreRecord]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create parent directory '{}'", parent.display())
        })?;
    }
    let raw = serde_json::to_string(records)?;
    fs::write(path, raw)
        .with_context(|| format!("failed to write leaderboard file '{}'", path.display()))
}

#[cfg(test)]
#[path = "tests/scores_tests.rs"]
mod tests;
