//! GET /api/log/ranking - 今日排行榜（非管理员 IP 脱敏）

use crate::AppState;
use crate::middleware::viewer;
use crate::utils::response::{ok, ranking_error};
use axum::{extract::State, http::HeaderMap, response::Response};

pub async fn get_ranking(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.ranking.ranking(viewer(&state, &headers)).await {
        Ok(data) => ok(data),
        Err(err) => ranking_error(err),
    }
}
