//! POST /api/relay/request - 转发路径上报一次请求
//!
//! 写入请求速率（RPM 倍率与首页统计）和调用日志（排行榜）。

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::{ok, storage_error};
use api_contract::RecordRequestDto;
use axum::{Json, extract::State, http::HeaderMap, response::Response};
use chrono::Utc;
use relay_storage::LogRecord;
use relay_telemetry::record_request_recorded;
use tracing::debug;

pub async fn record_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RecordRequestDto>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let now_ms = Utc::now().timestamp_millis();
    if let Err(err) = state.rate_store.record_request(req.user_id, now_ms).await {
        return storage_error(err);
    }
    let record = LogRecord {
        user_id: req.user_id,
        username: req.username,
        display_name: req.display_name,
        ip: req.ip.trim().to_string(),
        tokens: req.tokens,
        quota: req.quota,
        created_at_ms: now_ms,
    };
    if let Err(err) = state.ranking_store.record_log(record).await {
        return storage_error(err);
    }
    record_request_recorded();
    debug!(user_id = req.user_id, "relayed request recorded");
    ok(())
}
