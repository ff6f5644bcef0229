use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{CellKind, Grid};
use tracing::{info, warn};

/// Remote supplier of the ordered level list.
#[async_trait]
pub trait LevelSource: Send + Sync {
    async fn fetch_levels(&self) -> Result<Vec<Grid>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub index: usize,
    pub grid: Grid,
}

impl Level {
    /// 1-based level number shown to players and stored with scores.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Ordered, never-empty list of levels. Consumers only ever receive copies.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Fetches every level from `source`. Any failure, including an empty
    /// list, falls back to the embedded default level.
    pub async fn load_all(source: &dyn LevelSource) -> Self {
        match source.fetch_levels().await {
            Ok(grids) if !grids.is_empty() => {
                info!(count = grids.len(), "levels loaded");
                Self::from_grids(grids)
            }
            Ok(_) => {
                warn!("level source returned no levels; using built-in level");
                Self::fallback()
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "failed to load levels; using built-in level");
                Self::fallback()
            }
        }
    }

    /// Builds a catalog from `grids`, or the fallback catalog when empty.
    pub fn from_grids(grids: Vec<Grid>) -> Self {
        if grids.is_empty() {
            return Self::fallback();
        }
        Self {
            levels: grids
                .into_iter()
                .enumerate()
                .map(|(index, grid)| Level { index, grid })
                .collect(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            levels: vec![Level {
                index: 0,
                grid: fallback_grid(),
            }],
        }
    }

    /// Level at `idx`; indices past the end loop back to the first level.
    pub fn get(&self, idx: usize) -> Level {
        let idx = if idx >= self.levels.len() { 0 } else { idx };
        self.levels[idx].clone()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn has_next(&self, idx: usize) -> bool {
        idx + 1 < self.levels.len()
    }
}

/// 5x5 level used when the level source is unavailable.
pub fn fallback_grid() -> Grid {
    use CellKind::{Empty as O, Goal as G, Start as S, Wall as W};

    Grid::from_array([
        [S, O, W, O, O],
        [W, O, W, O, W],
        [O, O, O, O, O],
        [W, W, O, W, O],
        [G, O, O, W, O],
    ])
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
