//! GET /api/system/stats - 首页实时统计

use crate::AppState;
use crate::handlers::groups::load_group_settings;
use crate::utils::response::{ok, storage_error};
use api_contract::SystemStatsDto;
use axum::{extract::State, response::Response};
use chrono::Utc;
use tracing::warn;

const DEFAULT_GROUP: &str = "default";
const STATS_WINDOW_MS: i64 = 60_000;

pub async fn system_stats(State(state): State<AppState>) -> Response {
    let since_ms = Utc::now().timestamp_millis() - STATS_WINDOW_MS;
    let rpm = match state.rate_store.count_all_since(since_ms).await {
        Ok(count) => count,
        Err(err) => {
            warn!(error = %err, "request rate lookup failed");
            0
        }
    };
    let settings = match load_group_settings(&state).await {
        Ok(settings) => settings,
        Err(err) => return storage_error(err),
    };
    let (default_ratio, is_dynamic) = settings
        .effective_group_ratio(&state.evaluator, "", DEFAULT_GROUP, None)
        .await;
    ok(SystemStatsDto {
        rpm,
        default_ratio,
        is_dynamic,
    })
}
