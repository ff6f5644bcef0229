use std::{collections::HashMap, io::Write};

use client_core::{Counter, Marker, RankedScore, Renderer};
use shared::domain::{CellKind, Grid, Position};

/// Text renderer. Updates are collected and written out by
/// [`TerminalRenderer::present`], so one command produces one frame.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    grid: Option<Grid>,
    marks: HashMap<Position, Marker>,
    player: Option<Position>,
    counters: HashMap<Counter, String>,
    status: String,
    messages: Vec<String>,
    dirty: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The board as text: `#` wall, `.` floor, `S`/`G` endpoints, `o` visited,
    /// `*` path, `@` player.
    pub fn board(&self) -> String {
        let Some(grid) = &self.grid else {
            return String::new();
        };
        let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let pos = Position::new(row, col);
                out.push(self.glyph(grid, pos));
            }
            out.push('\n');
        }
        out
    }

    pub fn status_line(&self) -> String {
        let counter = |c: Counter, default: &'static str| {
            self.counters.get(&c).map_or(default, String::as_str).to_owned()
        };
        format!(
            "visited {}  path {}  time {}  [{}]",
            counter(Counter::Visited, "0"),
            counter(Counter::Path, "0"),
            counter(Counter::Timer, "00:00"),
            self.status
        )
    }

    /// Writes pending messages and, when anything changed, the board.
    pub fn present(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        for message in self.messages.drain(..) {
            writeln!(out, "{message}")?;
        }
        if self.dirty {
            write!(out, "{}", self.board())?;
            writeln!(out, "{}", self.status_line())?;
            self.dirty = false;
        }
        out.flush()
    }

    fn glyph(&self, grid: &Grid, pos: Position) -> char {
        if self.player == Some(pos) {
            return '@';
        }
        match grid.get(pos) {
            Some(CellKind::Start) => 'S',
            Some(CellKind::Goal) => 'G',
            Some(CellKind::Wall) => '#',
            _ => match self.marks.get(&pos) {
                Some(Marker::Path) => '*',
                Some(Marker::Visited) => 'o',
                _ => '.',
            },
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render_grid(&mut self, grid: &Grid) {
        self.grid = Some(grid.clone());
        self.marks.clear();
        self.player = None;
        self.dirty = true;
    }

    fn mark_cell(&mut self, position: Position, marker: Marker) {
        match marker {
            Marker::Player => self.player = Some(position),
            Marker::Path => {
                self.marks.insert(position, Marker::Path);
            }
            Marker::Visited => {
                self.marks.entry(position).or_insert(Marker::Visited);
            }
        }
        self.dirty = true;
    }

    fn update_counter(&mut self, counter: Counter, value: &str) {
        self.counters.insert(counter, value.to_string());
        self.dirty = true;
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.dirty = true;
    }

    fn notify(&mut self, message: &str) {
        self.messages.push(format!("*** {message}"));
    }

    fn render_leaderboard(&mut self, entries: &[RankedScore]) {
        self.messages.push("--- leaderboard ---".into());
        if entries.is_empty() {
            self.messages.push("(no scores yet)".into());
        }
        for entry in entries {
            self.messages.push(format!(
                "{:>3}. {:<16} level {:<3} {:.2}s",
                entry.rank, entry.record.name, entry.record.level, entry.record.time
            ));
        }
    }
}

#[cfg(test)]
#[path = "tests/renderer_tests.rs"]
mod tests;
