use std::path::Path;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use client_core::{animation::DEFAULT_SPEED, Mode};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeArg {
    Play,
    Visualize,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Play => Mode::Play,
            ModeArg::Visualize => Mode::Visualize,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(about = "Play and visualize mazes from the terminal")]
pub struct Args {
    /// Settings file; `maze.toml` in the working directory when omitted.
    #[arg(long)]
    pub config: Option<String>,
    #[arg(long)]
    pub server_url: Option<String>,
    /// Defaults to the server URL.
    #[arg(long)]
    pub solver_url: Option<String>,
    #[arg(long)]
    pub player_name: Option<String>,
    #[arg(long)]
    pub speed: Option<u16>,
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Console settings after layering file, environment and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub solver_url: Option<String>,
    pub player_name: Option<String>,
    pub speed: u16,
    pub mode: ModeArg,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            solver_url: None,
            player_name: None,
            speed: DEFAULT_SPEED,
            mode: ModeArg::Play,
        }
    }
}

impl Settings {
    pub fn solver_url(&self) -> &str {
        self.solver_url.as_deref().unwrap_or(&self.server_url)
    }

    /// Command-line values win over everything read from file or environment.
    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(v) = &args.server_url {
            self.server_url = v.clone();
        }
        if let Some(v) = &args.solver_url {
            self.solver_url = Some(v.clone());
        }
        if let Some(v) = &args.player_name {
            self.player_name = Some(v.clone());
        }
        if let Some(v) = args.speed {
            self.speed = v;
        }
        if let Some(v) = args.mode {
            self.mode = v;
        }
        self
    }
}

/// Reads `path` (or `maze.toml`, when present) and `MAZE__*` environment
/// variables over the defaults.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("maze").required(false),
    };
    config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("MAZE")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to read console settings")?
        .try_deserialize()
        .context("invalid console settings")
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
