//! 排行榜查询与缓存。
//!
//! 三个聚合查询并发执行，结果在同一自然日内按 TTL 缓存；
//! 跨日后缓存立即失效。非管理员拿到的是脱敏副本，缓存中始终保存原始数据。

use crate::build::{build_user_call_ranking, build_user_ip_count_ranking, build_user_token_ranking};
use crate::mask::mask_ranking;
use crate::RankingError;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use domain::{RankingData, Viewer};
use relay_storage::RankingStore;
use relay_telemetry::{
    record_ranking_cache_hit, record_ranking_cache_miss, record_ranking_query_latency_ms,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// 默认缓存时长（秒）。
pub const DEFAULT_CACHE_SECONDS: u64 = 300;
/// 默认每个排行榜的条数上限。
pub const DEFAULT_LIMIT: i64 = 100;

struct CachedRanking {
    data: RankingData,
    fetched_at: DateTime<Local>,
    day: NaiveDate,
}

impl CachedRanking {
    fn is_fresh(&self, now: DateTime<Local>, ttl: Duration) -> bool {
        if self.day != now.date_naive() {
            return false;
        }
        match (now - self.fetched_at).to_std() {
            Ok(age) => age < ttl,
            // 时钟回拨
            Err(_) => false,
        }
    }
}

pub struct RankingService {
    store: Arc<dyn RankingStore>,
    limit: i64,
    ttl: Duration,
    cache: RwLock<Option<CachedRanking>>,
}

impl RankingService {
    pub fn new(store: Arc<dyn RankingStore>, limit: i64, cache_seconds: u64) -> Self {
        Self {
            store,
            limit: limit.max(1),
            ttl: Duration::from_secs(cache_seconds),
            cache: RwLock::new(None),
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// 今日排行榜。
    pub async fn ranking(&self, viewer: Viewer) -> Result<RankingData, RankingError> {
        self.ranking_at(viewer, Local::now()).await
    }

    pub async fn ranking_at(
        &self,
        viewer: Viewer,
        now: DateTime<Local>,
    ) -> Result<RankingData, RankingError> {
        let data = self.load(now).await?;
        if viewer.is_admin() {
            Ok(data)
        } else {
            Ok(mask_ranking(&data))
        }
    }

    /// 丢弃缓存，下一次查询重新聚合。
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    async fn load(&self, now: DateTime<Local>) -> Result<RankingData, RankingError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref().filter(|cached| cached.is_fresh(now, self.ttl)) {
                record_ranking_cache_hit();
                debug!("ranking served from cache");
                return Ok(cached.data.clone());
            }
        }
        record_ranking_cache_miss();

        let since_ms = day_start_ms(now);
        let started = Instant::now();
        let (aggregates, ip_calls, minute_ips) = tokio::join!(
            self.store.user_aggregates(since_ms),
            self.store.ip_call_ranking(since_ms, self.limit),
            self.store.user_minute_ip_ranking(since_ms, self.limit),
        );
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        record_ranking_query_latency_ms(elapsed_ms);

        let aggregates = aggregates?;
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let data = RankingData {
            user_call_ranking: build_user_call_ranking(&aggregates, limit),
            ip_call_ranking: ip_calls?,
            user_token_ranking: build_user_token_ranking(&aggregates, limit),
            user_ip_count_ranking: build_user_ip_count_ranking(&aggregates, limit),
            user_minute_ip_ranking: minute_ips?,
        };
        info!(
            users = aggregates.len(),
            elapsed_ms, "ranking aggregated"
        );

        *self.cache.write().await = Some(CachedRanking {
            data: data.clone(),
            fetched_at: now,
            day: now.date_naive(),
        });
        Ok(data)
    }
}

/// 本地时区当日零点（毫秒）。
pub fn day_start_ms(now: DateTime<Local>) -> i64 {
    let midnight = now.date_naive().and_time(chrono::NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(start) => start.timestamp_millis(),
        // 零点不存在（夏令时跳变）时退回到 UTC 零点
        None => midnight.and_utc().timestamp_millis(),
    }
}
