use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use client_core::{
    Collaborators, LevelSource, ManualClock, Mode, ScoreStore, SolverTransport,
};
use shared::{
    domain::{Algorithm, Direction, Grid, Position},
    protocol::{ScoreRecord, SolveRequest, SolveResponse, SolveStatus},
};
use tokio::io::{duplex, AsyncWriteExt, BufReader};

use super::*;

struct Levels(Vec<Grid>);

#[async_trait]
impl LevelSource for Levels {
    async fn fetch_levels(&self) -> Result<Vec<Grid>> {
        Ok(self.0.clone())
    }
}

struct Solver(Option<SolveResponse>);

#[async_trait]
impl SolverTransport for Solver {
    async fn solve(&self, _request: &SolveRequest) -> Result<SolveResponse> {
        self.0.clone().ok_or_else(|| anyhow!("solver offline"))
    }
}

#[derive(Default)]
struct Scores(Mutex<Vec<ScoreRecord>>);

#[async_trait]
impl ScoreStore for Scores {
    async fn list_scores(&self) -> Result<Vec<ScoreRecord>> {
        Ok(self.0.lock().expect("scores").clone())
    }

    async fn submit_score(&self, record: &ScoreRecord) -> Result<()> {
        self.0.lock().expect("scores").push(record.clone());
        Ok(())
    }
}

async fn controller(
    rows: &[&str],
    solver: Option<SolveResponse>,
    scores: Arc<Scores>,
) -> ModeController<TerminalRenderer> {
    let grid = Grid::parse(rows).expect("grid");
    ModeController::start(
        "ada",
        Collaborators {
            levels: Arc::new(Levels(vec![grid])),
            solver: Arc::new(Solver(solver)),
            scores,
            clock: Arc::new(ManualClock::new()),
        },
        TerminalRenderer::new(),
    )
    .await
    .expect("start")
}

#[tokio::test]
async fn typed_moves_win_the_level_and_quit_ends_the_session() {
    let scores = Arc::new(Scores::default());
    let mut session = controller(&["S0G"], None, scores.clone()).await;
    let mut lines = BufReader::new(&b"d\n\nd\nquit\nd\n"[..]).lines();
    let mut out = Vec::new();

    run(&mut session, &mut lines, &mut out).await.expect("run");

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("*** You escaped Level 1! Time: 00:00"));
    assert!(text.contains("*** You completed all levels! Check the Leaderboard."));
    assert_eq!(scores.0.lock().expect("scores").len(), 1);
    assert_eq!(session.state().grid.grid().rows(), 1);
}

#[tokio::test]
async fn unknown_input_is_reported_and_the_session_continues() {
    let mut session = controller(&["S0G"], None, Arc::default()).await;
    let mut lines = BufReader::new(&b"jump\nd\n"[..]).lines();
    let mut out = Vec::new();

    run(&mut session, &mut lines, &mut out).await.expect("run");

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("unknown command 'jump'"));
    assert_eq!(session.player().position, Position::new(0, 1));
}

#[tokio::test]
async fn solve_in_play_mode_is_refused_with_a_message() {
    let mut session = controller(&["S0G"], None, Arc::default()).await;
    let flow = dispatch(&mut session, Command::Solve(Algorithm::Bfs)).await;
    assert_eq!(flow, Flow::Continue);

    let mut out = Vec::new();
    session.renderer_mut().present(&mut out).expect("present");
    assert!(String::from_utf8(out)
        .expect("utf8")
        .contains("solving is only available in visualize mode"));
}

#[tokio::test]
async fn visualize_solve_animates_to_a_verdict() {
    let cells: Vec<Position> = (0..3).map(|col| Position::new(0, col)).collect();
    let mut session = controller(
        &["S0G"],
        Some(SolveResponse::Completed {
            status: SolveStatus::Success,
            visited: cells.clone(),
            path: Some(cells),
        }),
        Arc::default(),
    )
    .await;

    dispatch(&mut session, Command::SwitchMode(Mode::Visualize)).await;
    dispatch(&mut session, Command::Solve(Algorithm::Dfs)).await;
    assert!(session.is_animating());

    dispatch(&mut session, Command::Solve(Algorithm::Dfs)).await;
    session.run_animation().await;

    let renderer = session.renderer_mut();
    assert!(renderer.status_line().ends_with("[Solved!]"));
    assert_eq!(renderer.board(), "S*G\n");
    let mut out = Vec::new();
    renderer.present(&mut out).expect("present");
    assert!(String::from_utf8(out)
        .expect("utf8")
        .contains("a solve or animation is already running"));
}

#[tokio::test]
async fn blocked_moves_and_speed_changes_update_the_display() {
    let mut session = controller(&["S0G"], None, Arc::default()).await;

    dispatch(&mut session, Command::Move(Direction::Up)).await;
    assert!(session.renderer().status_line().ends_with("[Blocked]"));

    dispatch(&mut session, Command::Speed(500)).await;
    assert_eq!(session.step_delay(), Duration::from_millis(10));
    assert_eq!(dispatch(&mut session, Command::Quit).await, Flow::Quit);
}

#[tokio::test]
async fn playback_after_an_idle_spell_waits_one_delay_per_step() {
    let cells: Vec<Position> = (0..30).map(|col| Position::new(0, col)).collect();
    let row = format!("S{}G", "0".repeat(28));
    let mut session = controller(
        &[row.as_str()],
        Some(SolveResponse::Completed {
            status: SolveStatus::Success,
            visited: cells.clone(),
            path: Some(cells),
        }),
        Arc::default(),
    )
    .await;
    assert_eq!(session.step_delay(), Duration::from_millis(110));

    let (mut input, reader) = duplex(256);
    let typist = tokio::spawn(async move {
        input.write_all(b"visualize\n").await?;
        tokio::time::sleep(Duration::from_secs(1)).await;
        input.write_all(b"solve bfs\n").await?;
        tokio::time::sleep(Duration::from_millis(50)).await;
        input.write_all(b"quit\n").await
    });
    let mut lines = BufReader::new(reader).lines();
    let mut out = Vec::new();

    run(&mut session, &mut lines, &mut out).await.expect("run");
    typist.await.expect("typist").expect("write");

    assert!(session.is_animating());
    let status = session.renderer().status_line();
    let visited: usize = status
        .split_whitespace()
        .nth(1)
        .and_then(|count| count.parse().ok())
        .expect("visited counter");
    assert!(visited <= 1, "steps ran ahead of the delay: {status}");
}
