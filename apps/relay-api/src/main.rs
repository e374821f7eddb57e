//! 分组倍率与排行榜 HTTP API。

mod handlers;
mod middleware;
mod routes;
mod utils;

use axum::{Router, middleware::from_fn};
use domain::options::DYNAMIC_GROUP_RATIO_SETTING;
use relay_config::AppConfig;
use relay_ranking::RankingService;
use relay_ratio::{MatchStrategy, RatioEvaluator};
use relay_storage::{
    InMemoryOptionStore, InMemoryRankingStore, InMemoryRequestRateStore, OptionStore,
    PgOptionStore, PgRankingStore, RankingStore, RedisRequestRateStore, RequestRateStore,
    connect_pool,
};
use relay_telemetry::{init_tracing, record_config_fallback};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// 全局应用状态（在 handlers 间共享）
#[derive(Clone)]
pub struct AppState {
    pub option_store: Arc<dyn OptionStore>,
    pub ranking_store: Arc<dyn RankingStore>,
    pub rate_store: Arc<dyn RequestRateStore>,
    /// 当前生效的动态倍率配置
    pub evaluator: Arc<RatioEvaluator>,
    pub ranking: Arc<RankingService>,
    pub admin_token: Arc<str>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let (option_store, ranking_store): (Arc<dyn OptionStore>, Arc<dyn RankingStore>) =
        match &config.database_url {
            Some(url) => {
                let pool = connect_pool(url).await?;
                info!("using postgres storage");
                (
                    Arc::new(PgOptionStore::new(pool.clone())),
                    Arc::new(PgRankingStore::new(pool)),
                )
            }
            None => {
                info!("RELAY_DATABASE_URL not set, using in-memory storage");
                (
                    Arc::new(InMemoryOptionStore::new()),
                    Arc::new(InMemoryRankingStore::new()),
                )
            }
        };
    let rate_store: Arc<dyn RequestRateStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisRequestRateStore::connect(url)?),
        None => Arc::new(InMemoryRequestRateStore::new()),
    };

    let strategy = MatchStrategy::parse(&config.ratio_match_strategy).unwrap_or_default();
    let evaluator = Arc::new(RatioEvaluator::new(rate_store.clone(), strategy));
    load_dynamic_setting(option_store.as_ref(), &evaluator).await;

    let ranking = Arc::new(RankingService::new(
        ranking_store.clone(),
        config.ranking_limit,
        config.ranking_cache_seconds,
    ));
    let state = AppState {
        option_store,
        ranking_store,
        rate_store,
        evaluator,
        ranking,
        admin_token: Arc::from(config.admin_token.as_str()),
    };

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, ?strategy, "relay-api listening");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_app(state: AppState) -> Router {
    routes::create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 注入 request_id/trace_id
        .layer(from_fn(middleware::request_context))
}

/// 启动时载入已保存的动态倍率设置；不合法时保持关闭。
async fn load_dynamic_setting(store: &dyn OptionStore, evaluator: &RatioEvaluator) {
    match store.get_option(DYNAMIC_GROUP_RATIO_SETTING).await {
        Ok(Some(text)) => {
            if let Err(err) = evaluator.load_str(&text) {
                warn!(error = %err, "stored DynamicGroupRatioSetting is invalid, dynamic ratio disabled");
                record_config_fallback();
            }
        }
        Ok(None) => {}
        Err(err) => warn!(error = %err, "failed to load DynamicGroupRatioSetting"),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{HeaderMap, HeaderValue, header};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::Value;

    pub const ADMIN_TOKEN: &str = "admin-secret";

    pub fn state_with_options(options: &[(&str, &str)]) -> AppState {
        let rate_store: Arc<dyn RequestRateStore> = Arc::new(InMemoryRequestRateStore::new());
        let ranking_store: Arc<dyn RankingStore> = Arc::new(InMemoryRankingStore::new());
        AppState {
            option_store: Arc::new(InMemoryOptionStore::with_options(options.iter().copied())),
            ranking_store: ranking_store.clone(),
            rate_store: rate_store.clone(),
            evaluator: Arc::new(RatioEvaluator::new(rate_store, MatchStrategy::default())),
            ranking: Arc::new(RankingService::new(ranking_store, 100, 300)),
            admin_token: Arc::from(ADMIN_TOKEN),
        }
    }

    pub fn admin_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {ADMIN_TOKEN}")).expect("header"),
        );
        headers
    }

    pub async fn body_json(response: Response<Body>) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }
}
