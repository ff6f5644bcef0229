use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(tag: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("maze_scores_{tag}_{suffix}"))
}

#[tokio::test]
async fn in_memory_board_keeps_insertion_order() {
    let board = ScoreBoard::in_memory();
    board.append(ScoreRecord::new("a", 1, 9.0)).await;
    board.append(ScoreRecord::new("b", 3, 2.0)).await;
    let names: Vec<String> = board.list().await.into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[tokio::test]
async fn appends_are_mirrored_and_reloaded() {
    let root = temp_root("mirror");
    let path = root.join("nested").join("leaderboard.json");

    let board = ScoreBoard::open(path.clone());
    assert!(board.list().await.is_empty());
    board.append(ScoreRecord::new("ada", 2, 14.25)).await;
    assert!(path.exists());

    let reopened = ScoreBoard::open(path);
    assert_eq!(
        reopened.list().await,
        vec![ScoreRecord::new("ada", 2, 14.25)]
    );

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn corrupt_file_starts_empty() {
    let root = temp_root("corrupt");
    fs::create_dir_all(&root).expect("dir");
    let path = root.join("leaderboard.json");
    fs::write(&path, "{ not json").expect("write");

    let board = ScoreBoard::open(path);
    assert!(board.list().await.is_empty());

    let _ = fs::remove_dir_all(root);
}
