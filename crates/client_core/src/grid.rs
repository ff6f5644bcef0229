use shared::domain::{CellKind, Grid, Position};

/// Owner of the active maze grid.
///
/// The model always holds its own copy; loading never aliases the caller's
/// grid, so in-place changes cannot leak back into the level catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    grid: Grid,
}

impl GridModel {
    pub fn new(grid: &Grid) -> Self {
        Self { grid: grid.clone() }
    }

    pub fn load(&mut self, grid: &Grid) {
        self.grid = grid.clone();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn kind_at(&self, pos: Position) -> Option<CellKind> {
        self.grid.get(pos)
    }

    /// Row-major scan for `kind`. When several cells match, the last one
    /// scanned wins; with no match the result is `(0, 0)`.
    pub fn locate(&self, kind: CellKind) -> Position {
        self.grid
            .iter()
            .filter(|(_, cell)| *cell == kind)
            .map(|(pos, _)| pos)
            .last()
            .unwrap_or_default()
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        matches!(self.grid.get(pos), Some(kind) if kind != CellKind::Wall)
    }
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
