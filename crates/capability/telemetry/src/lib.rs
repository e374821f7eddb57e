//! 追踪、请求 ID 与进程内计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub options_written: u64,
    pub option_write_failures: u64,
    pub config_fallbacks: u64,
    pub ranking_cache_hits: u64,
    pub ranking_cache_misses: u64,
    pub ranking_query_latency_ms_total: u64,
    pub ranking_query_latency_ms_count: u64,
    pub dynamic_ratio_hits: u64,
    pub requests_recorded: u64,
}

pub struct TelemetryMetrics {
    options_written: AtomicU64,
    option_write_failures: AtomicU64,
    config_fallbacks: AtomicU64,
    ranking_cache_hits: AtomicU64,
    ranking_cache_misses: AtomicU64,
    ranking_query_latency_ms_total: AtomicU64,
    ranking_query_latency_ms_count: AtomicU64,
    dynamic_ratio_hits: AtomicU64,
    requests_recorded: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            options_written: AtomicU64::new(0),
            option_write_failures: AtomicU64::new(0),
            config_fallbacks: AtomicU64::new(0),
            ranking_cache_hits: AtomicU64::new(0),
            ranking_cache_misses: AtomicU64::new(0),
            ranking_query_latency_ms_total: AtomicU64::new(0),
            ranking_query_latency_ms_count: AtomicU64::new(0),
            dynamic_ratio_hits: AtomicU64::new(0),
            requests_recorded: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            options_written: self.options_written.load(Ordering::Relaxed),
            option_write_failures: self.option_write_failures.load(Ordering::Relaxed),
            config_fallbacks: self.config_fallbacks.load(Ordering::Relaxed),
            ranking_cache_hits: self.ranking_cache_hits.load(Ordering::Relaxed),
            ranking_cache_misses: self.ranking_cache_misses.load(Ordering::Relaxed),
            ranking_query_latency_ms_total: self
                .ranking_query_latency_ms_total
                .load(Ordering::Relaxed),
            ranking_query_latency_ms_count: self
                .ranking_query_latency_ms_count
                .load(Ordering::Relaxed),
            dynamic_ratio_hits: self.dynamic_ratio_hits.load(Ordering::Relaxed),
            requests_recorded: self.requests_recorded.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录设置项写入成功次数。
pub fn record_option_written() {
    metrics().options_written.fetch_add(1, Ordering::Relaxed);
}

/// 记录设置项写入被拒绝或失败的次数。
pub fn record_option_write_failure() {
    metrics()
        .option_write_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录设置解析降级为默认值的次数。
pub fn record_config_fallback() {
    metrics().config_fallbacks.fetch_add(1, Ordering::Relaxed);
}

pub fn record_ranking_cache_hit() {
    metrics().ranking_cache_hits.fetch_add(1, Ordering::Relaxed);
}

pub fn record_ranking_cache_miss() {
    metrics().ranking_cache_misses.fetch_add(1, Ordering::Relaxed);
}

/// 记录排行榜聚合查询耗时（毫秒）。
pub fn record_ranking_query_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .ranking_query_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .ranking_query_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录动态倍率命中次数。
pub fn record_dynamic_ratio_hit() {
    metrics().dynamic_ratio_hits.fetch_add(1, Ordering::Relaxed);
}

/// 记录写入请求速率窗口的请求数。
pub fn record_request_recorded() {
    metrics().requests_recorded.fetch_add(1, Ordering::Relaxed);
}
