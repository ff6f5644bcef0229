use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Single maze cell. Serialized with the one-character codes used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    #[serde(rename = "0")]
    Empty,
    #[serde(rename = "1")]
    Wall,
    #[serde(rename = "S")]
    Start,
    #[serde(rename = "G")]
    Goal,
}

impl CellKind {
    pub fn code(self) -> char {
        match self {
            CellKind::Empty => '0',
            CellKind::Wall => '1',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(CellKind::Empty),
            '1' => Some(CellKind::Wall),
            'S' => Some(CellKind::Start),
            'G' => Some(CellKind::Goal),
            _ => None,
        }
    }
}

/// Zero-based `(row, col)` coordinate. Travels as a two-element JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Applies `delta`, returning `None` when the result would leave the
    /// non-negative quadrant. Upper bounds are the grid's business.
    pub fn offset(self, delta: Delta) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(delta.rows)?,
            col: self.col.checked_add_signed(delta.cols)?,
        })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Position> for (usize, usize) {
    fn from(value: Position) -> Self {
        (value.row, value.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delta {
    pub rows: isize,
    pub cols: isize,
}

impl Delta {
    pub const fn new(rows: isize, cols: isize) -> Self {
        Self { rows, cols }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> Delta {
        match self {
            Direction::Up => Delta::new(-1, 0),
            Direction::Down => Delta::new(1, 0),
            Direction::Left => Delta::new(0, -1),
            Direction::Right => Delta::new(0, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}'")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "up" | "arrowup" => Ok(Direction::Up),
            "s" | "down" | "arrowdown" => Ok(Direction::Down),
            "a" | "left" | "arrowleft" => Ok(Direction::Left),
            "d" | "right" | "arrowright" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("grid row {row} has no cells")]
    EmptyRow { row: usize },
    #[error("grid row {row} has {actual} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown cell code '{code}' at ({row}, {col})")]
    UnknownCode { row: usize, col: usize, code: char },
}

/// Rectangular matrix of cells, at least 1x1.
///
/// Start/Goal uniqueness is a property of the level data and is not checked
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<CellKind>>", into = "Vec<Vec<CellKind>>")]
pub struct Grid {
    cells: Vec<Vec<CellKind>>,
}

impl Grid {
    pub fn new(cells: Vec<Vec<CellKind>>) -> Result<Self, GridError> {
        let Some(first) = cells.first() else {
            return Err(GridError::Empty);
        };
        let expected = first.len();
        for (row, cells_in_row) in cells.iter().enumerate() {
            if cells_in_row.is_empty() {
                return Err(GridError::EmptyRow { row });
            }
            if cells_in_row.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    actual: cells_in_row.len(),
                });
            }
        }
        Ok(Self { cells })
    }

    /// Infallible constructor for fixed-size grids embedded in code.
    pub fn from_array<const R: usize, const C: usize>(cells: [[CellKind; C]; R]) -> Self {
        let () = NonEmpty::<R, C>::CHECK;
        Self {
            cells: cells.into_iter().map(Vec::from).collect(),
        }
    }

    /// Builds a grid from rows of cell codes, e.g. `["S0", "1G"]`.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let cells = rows
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(col, code)| {
                        CellKind::from_code(code).ok_or(GridError::UnknownCode { row, col, code })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(cells)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }

    pub fn get(&self, pos: Position) -> Option<CellKind> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    pub fn cells(&self) -> &[Vec<CellKind>] {
        &self.cells
    }

    /// Row-major walk over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellKind)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, kind)| (Position::new(row, col), *kind))
        })
    }
}

struct NonEmpty<const R: usize, const C: usize>;

impl<const R: usize, const C: usize> NonEmpty<R, C> {
    const CHECK: () = assert!(R > 0 && C > 0, "grid must be at least 1x1");
}

impl TryFrom<Vec<Vec<CellKind>>> for Grid {
    type Error = GridError;

    fn try_from(value: Vec<Vec<CellKind>>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grid> for Vec<Vec<CellKind>> {
    fn from(value: Grid) -> Self {
        value.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.cells {
            for kind in line {
                write!(f, "{}", kind.code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Search strategy requested from the external solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bfs,
    Dfs,
    AStar,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm '{0}' (expected bfs, dfs or astar)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "astar" | "a*" => Ok(Algorithm::AStar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}
