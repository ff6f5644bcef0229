use std::{
    io::{self, Write},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    transport::HttpBackend, Collaborators, Mode, ModeController, Renderer, SystemClock,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod renderer;
mod session;
mod settings;

use commands::HELP;
use renderer::TerminalRenderer;
use settings::{load_settings, Args};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = load_settings(args.config.as_deref().map(Path::new))?.apply_args(&args);
    info!(server_url = %settings.server_url, solver_url = %settings.solver_url(), "starting console");

    let backend = Arc::new(
        HttpBackend::new(&settings.server_url)?.with_solver_url(settings.solver_url())?,
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    let player_name = match settings.player_name.clone() {
        Some(name) => name,
        None => {
            write!(stdout, "player name: ")?;
            stdout.flush()?;
            lines.next_line().await?.unwrap_or_default()
        }
    };

    let collaborators = Collaborators {
        levels: backend.clone(),
        solver: backend.clone(),
        scores: backend,
        clock: Arc::new(SystemClock),
    };
    let mut controller = ModeController::start(&player_name, collaborators, TerminalRenderer::new())
        .await
        .context("could not start a session")?;
    controller.set_speed(settings.speed);
    let mode = Mode::from(settings.mode);
    if mode != Mode::Play {
        controller.set_mode(mode);
    }
    controller.renderer_mut().notify(HELP);

    session::run(&mut controller, &mut lines, &mut stdout).await
}
