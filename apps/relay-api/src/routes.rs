//! 路由定义
//!
//! - 健康检查：/health
//! - 设置项：/api/option（管理令牌）
//! - 分组：/api/group, /api/user/groups
//! - 排行榜与统计：/api/log/ranking, /api/system/stats
//! - 转发上报：/api/relay/request（管理令牌）
//! - 计数器：/api/metrics（管理令牌）

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/option", get(list_options).put(update_option))
        .route("/api/group", get(list_groups))
        .route("/api/user/groups", get(user_groups))
        .route("/api/log/ranking", get(get_ranking))
        .route("/api/system/stats", get(system_stats))
        .route("/api/relay/request", post(record_request))
        .route("/api/metrics", get(get_metrics))
}
