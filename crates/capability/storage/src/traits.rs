//! 存储接口 Trait 定义
//!
//! - OptionStore：设置项键值存储
//! - RankingStore：调用日志与当日排行榜聚合
//! - RequestRateStore：按用户的请求时间窗口（RPM 统计）
//!
//! 所有接口返回 StorageError，使用 async_trait 支持动态分发。

use crate::error::StorageError;
use crate::models::{LogRecord, OptionRecord};
use async_trait::async_trait;
use domain::{IpCallRanking, UserAggregate, UserMinuteIpRanking};

/// 设置项存储接口
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// 列出全部设置项（按 key 排序）
    async fn list_options(&self) -> Result<Vec<OptionRecord>, StorageError>;

    async fn get_option(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 写入设置项（存在则覆盖）
    async fn put_option(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// 排行榜数据接口
///
/// `since_ms` 为统计起点（通常是当日零点）。
#[async_trait]
pub trait RankingStore: Send + Sync {
    async fn record_log(&self, record: LogRecord) -> Result<(), StorageError>;

    /// 按用户聚合：调用次数、token、额度与去重 IP 列表（不限条数）
    async fn user_aggregates(&self, since_ms: i64) -> Result<Vec<UserAggregate>, StorageError>;

    /// 按 IP 聚合调用次数（忽略空 IP，按次数降序）
    async fn ip_call_ranking(
        &self,
        since_ms: i64,
        limit: i64,
    ) -> Result<Vec<IpCallRanking>, StorageError>;

    /// 每个用户单分钟内的最大不同 IP 数（按 IP 数降序）
    async fn user_minute_ip_ranking(
        &self,
        since_ms: i64,
        limit: i64,
    ) -> Result<Vec<UserMinuteIpRanking>, StorageError>;
}

/// 请求速率存储接口
#[async_trait]
pub trait RequestRateStore: Send + Sync {
    async fn record_request(&self, user_id: i64, at_ms: i64) -> Result<(), StorageError>;

    /// 指定用户自 `since_ms` 起的请求数
    async fn count_since(&self, user_id: i64, since_ms: i64) -> Result<u64, StorageError>;

    /// 全站自 `since_ms` 起的请求数
    async fn count_all_since(&self, since_ms: i64) -> Result<u64, StorageError>;
}
