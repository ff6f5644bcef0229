use std::{fs, path::Path};

use anyhow::{bail, Context};
use shared::domain::Grid;
use tracing::{info, warn};

const BUILTIN_LEVELS: &[&[&str]] = &[
    &[
        "S001010001",
        "1101000101",
        "0001011100",
        "0111000010",
        "0000111010",
        "1110001000",
        "0000100010",
        "0111111110",
        "000000000G",
    ],
    &[
        "S0100",
        "10101",
        "00000",
        "11010",
        "G0010",
    ],
    &[
        "S000100",
        "1110101",
        "0000100",
        "0111110",
        "0100000",
        "0101111",
        "000000G",
    ],
];

/// Levels compiled into the binary, in play order.
pub fn builtin_levels() -> Vec<Grid> {
    BUILTIN_LEVELS
        .iter()
        .filter_map(|rows| match Grid::parse(rows) {
            Ok(grid) => Some(grid),
            Err(error) => {
                warn!(%error, "skipping malformed built-in level");
                None
            }
        })
        .collect()
}

pub fn read_levels(path: &Path) -> anyhow::Result<Vec<Grid>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read levels file '{}'", path.display()))?;
    let levels: Vec<Grid> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid levels file '{}'", path.display()))?;
    if levels.is_empty() {
        bail!("levels file '{}' holds no levels", path.display());
    }
    Ok(levels)
}

/// Levels from `path` when set and readable, else the built-in catalog.
pub fn load_levels(path: Option<&Path>) -> Vec<Grid> {
    let Some(path) = path else {
        return builtin_levels();
    };
    match read_levels(path) {
        Ok(levels) => {
            info!(count = levels.len(), path = %path.display(), "levels loaded from file");
            levels
        }
        Err(error) => {
            warn!(error = %format!("{error:#}"), "falling back to built-in levels");
            builtin_levels()
        }
    }
}

#[cfg(test)]
#[path = "tests/levels_tests.rs"]
mod tests;
