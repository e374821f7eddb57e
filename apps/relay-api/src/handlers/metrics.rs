//! GET /api/metrics - 计数器快照（管理令牌）

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::ok;
use api_contract::MetricsSnapshotDto;
use axum::{extract::State, http::HeaderMap, response::Response};
use relay_telemetry::metrics;

pub async fn get_metrics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let snapshot = metrics().snapshot();
    ok(MetricsSnapshotDto {
        options_written: snapshot.options_written,
        option_write_failures: snapshot.option_write_failures,
        config_fallbacks: snapshot.config_fallbacks,
        ranking_cache_hits: snapshot.ranking_cache_hits,
        ranking_cache_misses: snapshot.ranking_cache_misses,
        ranking_query_latency_ms_total: snapshot.ranking_query_latency_ms_total,
        ranking_query_latency_ms_count: snapshot.ranking_query_latency_ms_count,
        dynamic_ratio_hits: snapshot.dynamic_ratio_hits,
        requests_recorded: snapshot.requests_recorded,
    })
}
