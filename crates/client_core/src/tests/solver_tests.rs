use super::*;
use crate::test_support::{grid, ScriptedSolver};
use tokio::sync::Notify;

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

#[tokio::test]
async fn success_carries_visited_and_path() {
    let solver = Arc::new(ScriptedSolver::responding(SolveResponse::Completed {
        status: SolveStatus::Success,
        visited: vec![p(0, 0), p(0, 1), p(1, 1)],
        path: Some(vec![p(0, 0), p(0, 1), p(1, 1)]),
    }));
    let orchestrator = SolveOrchestrator::new(solver.clone());

    let outcome = orchestrator
        .request(&grid(&["S0", "1G"]), Algorithm::Bfs)
        .await
        .expect("solve");

    assert_eq!(outcome.visited().len(), 3);
    assert_eq!(outcome.path(), Some(&[p(0, 0), p(0, 1), p(1, 1)][..]));

    let requests = solver.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].algorithm, Algorithm::Bfs);
    assert_eq!(requests[0].maze, grid(&["S0", "1G"]));
}

#[tokio::test]
async fn not_found_has_no_path() {
    let solver = Arc::new(ScriptedSolver::responding(SolveResponse::Completed {
        status: SolveStatus::NotFound,
        visited: vec![p(0, 0)],
        path: None,
    }));
    let outcome = SolveOrchestrator::new(solver)
        .request(&grid(&["S1G"]), Algorithm::Dfs)
        .await
        .expect("solve");
    assert_eq!(
        outcome,
        SolveOutcome::NotFound {
            visited: vec![p(0, 0)]
        }
    );
    assert_eq!(outcome.path(), None);
}

#[tokio::test]
async fn solver_error_body_becomes_rejection() {
    let solver = Arc::new(ScriptedSolver::responding(SolveResponse::Failed {
        error: "Start or Goal missing".into(),
    }));
    let outcome = SolveOrchestrator::new(solver)
        .request(&grid(&["00"]), Algorithm::AStar)
        .await
        .expect("solve");
    assert_eq!(
        outcome,
        SolveOutcome::Rejected {
            message: "Start or Goal missing".into()
        }
    );
}

#[tokio::test]
async fn transport_failure_is_an_error_and_releases_the_guard() {
    let orchestrator = SolveOrchestrator::new(Arc::new(ScriptedSolver::failing("connection reset")));
    let err = orchestrator
        .request(&grid(&["SG"]), Algorithm::Bfs)
        .await
        .expect_err("must fail");
    assert!(matches!(err, SolveError::Transport(_)));
    assert!(err.to_string().contains("connection reset"));
    assert!(!orchestrator.is_in_flight());
}

#[tokio::test]
async fn success_without_path_is_malformed() {
    let solver = Arc::new(ScriptedSolver::responding(SolveResponse::Completed {
        status: SolveStatus::Success,
        visited: vec![p(0, 0)],
        path: None,
    }));
    let err = SolveOrchestrator::new(solver)
        .request(&grid(&["SG"]), Algorithm::Bfs)
        .await
        .expect_err("must fail");
    assert!(matches!(err, SolveError::MalformedResponse(_)));
}

#[tokio::test]
async fn second_request_while_one_is_outstanding_is_refused() {
    let gate = Arc::new(Notify::new());
    let solver = Arc::new(
        ScriptedSolver::responding(SolveResponse::Completed {
            status: SolveStatus::NotFound,
            visited: Vec::new(),
            path: None,
        })
        .gated(gate.clone()),
    );
    let orchestrator = SolveOrchestrator::new(solver.clone());
    let maze = grid(&["SG"]);

    let first = orchestrator.request(&maze, Algorithm::Bfs);
    let second = async {
        tokio::task::yield_now().await;
        assert!(orchestrator.is_in_flight());
        let result = orchestrator.request(&maze, Algorithm::Dfs).await;
        gate.notify_one();
        result
    };
    let (first, second) = tokio::join!(first, second);

    assert!(first.is_ok());
    assert!(matches!(second, Err(SolveError::Busy)));
    assert_eq!(solver.requests.lock().await.len(), 1);
    assert!(!orchestrator.is_in_flight());

    gate.notify_one();
    orchestrator
        .request(&maze, Algorithm::Bfs)
        .await
        .map(|_| ())
        .unwrap_or_else(|err| panic!("guard not released: {err}"));
}
