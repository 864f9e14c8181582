use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::TrendStore;
use crate::error::AppError;
use crate::trends::window::build_windows;
use crate::twitch::TwitchClient;
use crate::types::Vod;

#[derive(Clone)]
pub struct ApiState {
    pub store: TrendStore,
    pub twitch: Arc<TwitchClient>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/vods/resolve", get(resolve_vod))
        .route("/vods/:id", get(get_vod))
        .route("/trends", get(get_trends))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ResolveQuery {
    /// A VOD URL or a bare VOD id; the last path segment is the id.
    pub q: String,
}

#[derive(Deserialize)]
pub struct TrendsQuery {
    pub start_time: i64,
    pub end_time: i64,
    pub user_name: String,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ResolveResponse {
    pub id: String,
}

#[derive(Serialize)]
pub struct TrendWindowResponse {
    pub start_time: i64,
    pub end_time: i64,
    pub volume: i64,
    pub keyword: String,
    /// Seconds into the stream at which the window opens.
    pub stream_offset: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_vod(
    State(state): State<ApiState>,
    Path(video_id): Path<String>,
) -> Result<Json<Vod>, AppError> {
    let vod = state.twitch.get_vod(&video_id).await?;
    Ok(Json(vod))
}

/// The search-box handler: accepts either a full VOD URL or a bare id,
/// looks the video up, and hands back its canonical id.
async fn resolve_vod(
    State(state): State<ApiState>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, AppError> {
    let candidate = vod_id_from_input(&params.q);
    let vod = state.twitch.get_vod(candidate).await?;
    Ok(Json(ResolveResponse { id: vod.id }))
}

async fn get_trends(
    State(state): State<ApiState>,
    Query(params): Query<TrendsQuery>,
) -> Result<Json<Vec<TrendWindowResponse>>, AppError> {
    let rows = state
        .store
        .correlated_samples(params.start_time, params.end_time, &params.user_name)
        .await?;

    let windows = build_windows(rows)
        .into_iter()
        .map(|w| TrendWindowResponse {
            stream_offset: w.start_time - params.start_time,
            start_time: w.start_time,
            end_time: w.end_time,
            volume: w.volume,
            keyword: w.keyword,
        })
        .collect();

    Ok(Json(windows))
}

fn vod_id_from_input(input: &str) -> &str {
    input.rsplit('/').next().unwrap_or(input)
}
