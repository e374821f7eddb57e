//! Redis 请求速率实现
//!
//! 每个用户一个列表 `rateLimit:MRRLS:{user_id}`，左侧插入
//! `%Y-%m-%d %H:%M:%S`（UTC）格式的请求时间。

use crate::error::StorageError;
use crate::traits::RequestRateStore;
use crate::RATE_RETENTION_MS;
use chrono::{DateTime, NaiveDateTime};
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

const KEY_PREFIX: &str = "rateLimit:MRRLS:";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// 单个用户列表保留的最大条数。
const MAX_ENTRIES: isize = 10_000;

fn rate_key(user_id: i64) -> String {
    format!("{KEY_PREFIX}{user_id}")
}

fn format_timestamp(ts_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(ts_ms).map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
}

fn parse_timestamp(text: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .ok()
        .map(|ts| ts.and_utc().timestamp_millis())
}

/// Redis 请求速率存储
pub struct RedisRequestRateStore {
    client: redis::Client,
}

impl RedisRequestRateStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    pub fn connect(redis_url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self::new(client))
    }

    async fn connection(&self) -> Result<MultiplexedConnection, StorageError> {
        Ok(self.client.get_multiplexed_tokio_connection().await?)
    }
}

async fn count_key(
    connection: &mut MultiplexedConnection,
    key: &str,
    since_ms: i64,
) -> Result<u64, StorageError> {
    let entries: Vec<String> = connection.lrange(key, 0, -1).await?;
    Ok(entries
        .iter()
        .filter_map(|entry| parse_timestamp(entry))
        .filter(|ts| *ts >= since_ms)
        .count() as u64)
}

#[async_trait::async_trait]
impl RequestRateStore for RedisRequestRateStore {
    async fn record_request(&self, user_id: i64, at_ms: i64) -> Result<(), StorageError> {
        let stamp = format_timestamp(at_ms)
            .ok_or_else(|| StorageError::new("timestamp out of range"))?;
        let key = rate_key(user_id);
        let mut connection = self.connection().await?;
        redis::pipe()
            .lpush(&key, stamp)
            .ignore()
            .ltrim(&key, 0, MAX_ENTRIES - 1)
            .ignore()
            .expire(&key, RATE_RETENTION_MS / 1000)
            .ignore()
            .query_async::<_, ()>(&mut connection)
            .await?;
        Ok(())
    }

    async fn count_since(&self, user_id: i64, since_ms: i64) -> Result<u64, StorageError> {
        let mut connection = self.connection().await?;
        count_key(&mut connection, &rate_key(user_id), since_ms).await
    }

    async fn count_all_since(&self, since_ms: i64) -> Result<u64, StorageError> {
        let mut connection = self.connection().await?;
        let pattern = format!("{KEY_PREFIX}*");
        let mut cursor: u64 = 0;
        let mut total = 0;
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut connection)
                .await?;
            for key in keys {
                total += count_key(&mut connection, &key, since_ms).await?;
            }
            if next_cursor == 0 {
                break;
            }
            cursor = next_cursor;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_round_trips_to_the_second() {
        let ts_ms = 1_700_000_000_123;
        let text = format_timestamp(ts_ms).expect("format");
        assert_eq!(text, "2023-11-14 22:13:20");
        assert_eq!(parse_timestamp(&text), Some(1_700_000_000_000));
    }

    #[test]
    fn key_uses_rate_limit_prefix() {
        assert_eq!(rate_key(42), "rateLimit:MRRLS:42");
    }

    #[test]
    fn garbage_entries_are_ignored() {
        assert_eq!(parse_timestamp("not a time"), None);
    }
}
