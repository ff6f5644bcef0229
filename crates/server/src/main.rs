use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::Grid,
    error::{ApiError, ErrorCode},
    protocol::{leaderboard_route, levels_route, ScoreRecord, SubmitScoreResponse},
};
use tracing::info;

mod api;
mod app_state;
mod config;
mod levels;
mod scores;

use api::ApiContext;
use app_state::AppState;
use config::load_settings;
use levels::load_levels;
use scores::ScoreBoard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let levels = load_levels(settings.levels_path.as_deref());
    let scores = match settings.leaderboard_path.clone() {
        Some(path) => ScoreBoard::open(path),
        None => ScoreBoard::in_memory(),
    };
    let state = AppState {
        api: ApiContext {
            levels: Arc::new(levels),
            scores: Arc::new(scores),
        },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(levels_route(), get(http_list_levels))
        .route(
            leaderboard_route(),
            get(http_list_scores).post(http_submit_score),
        )
        .fallback(not_found)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_levels(State(state): State<Arc<AppState>>) -> Json<Vec<Grid>> {
    Json(api::list_levels(&state.api))
}

async fn http_list_scores(State(state): State<Arc<AppState>>) -> Json<Vec<ScoreRecord>> {
    Json(api::list_scores(&state.api).await)
}

async fn http_submit_score(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ScoreRecord>, JsonRejection>,
) -> Result<Json<SubmitScoreResponse>, (StatusCode, Json<ApiError>)> {
    let Json(record) = body.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
        )
    })?;
    api::submit_score(&state.api, record)
        .await
        .map(Json)
        .map_err(|e| (status_for(e.code), Json(e)))
}

async fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "no such route")),
    )
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
