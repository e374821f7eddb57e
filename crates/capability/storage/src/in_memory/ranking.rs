//! 排行榜内存实现
//!
//! 保存原始调用日志，查询时在内存中完成与 SQL 等价的聚合。

use crate::error::StorageError;
use crate::models::LogRecord;
use crate::traits::RankingStore;
use chrono::DateTime;
use domain::{IpCallRanking, UserAggregate, UserMinuteIpRanking};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

/// 调用日志内存存储
pub struct InMemoryRankingStore {
    logs: RwLock<Vec<LogRecord>>,
}

impl InMemoryRankingStore {
    pub fn new() -> Self {
        Self {
            logs: RwLock::new(Vec::new()),
        }
    }

    pub fn with_logs(logs: Vec<LogRecord>) -> Self {
        Self {
            logs: RwLock::new(logs),
        }
    }

    fn logs_since(&self, since_ms: i64) -> Result<Vec<LogRecord>, StorageError> {
        let logs = self
            .logs
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(logs
            .iter()
            .filter(|log| log.created_at_ms >= since_ms)
            .cloned()
            .collect())
    }
}

impl Default for InMemoryRankingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct UserBucket {
    display_name: String,
    ips: BTreeSet<String>,
    count: i64,
    tokens: i64,
    quota: i64,
}

#[derive(Default)]
struct IpBucket {
    usernames: BTreeSet<String>,
    display_names: BTreeSet<String>,
    count: i64,
}

fn truncate<T>(items: &mut Vec<T>, limit: i64) {
    let limit = limit.max(0) as usize;
    if limit > 0 && items.len() > limit {
        items.truncate(limit);
    }
}

fn minute_of(ts_ms: i64) -> String {
    DateTime::from_timestamp_millis(ts_ms)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(",")
}

#[async_trait::async_trait]
impl RankingStore for InMemoryRankingStore {
    async fn record_log(&self, record: LogRecord) -> Result<(), StorageError> {
        let mut logs = self
            .logs
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        logs.push(record);
        Ok(())
    }

    async fn user_aggregates(&self, since_ms: i64) -> Result<Vec<UserAggregate>, StorageError> {
        let mut buckets: BTreeMap<String, UserBucket> = BTreeMap::new();
        for log in self.logs_since(since_ms)? {
            let bucket = buckets.entry(log.username).or_default();
            if !log.display_name.is_empty() {
                bucket.display_name = log.display_name;
            }
            let ip = log.ip.trim();
            if !ip.is_empty() {
                bucket.ips.insert(ip.to_string());
            }
            bucket.count += 1;
            bucket.tokens += log.tokens;
            bucket.quota += log.quota;
        }
        Ok(buckets
            .into_iter()
            .map(|(username, bucket)| UserAggregate {
                username,
                display_name: bucket.display_name,
                ip: join(&bucket.ips),
                ip_count: bucket.ips.len() as i64,
                count: bucket.count,
                tokens: bucket.tokens,
                quota: bucket.quota,
            })
            .collect())
    }

    async fn ip_call_ranking(
        &self,
        since_ms: i64,
        limit: i64,
    ) -> Result<Vec<IpCallRanking>, StorageError> {
        let mut buckets: BTreeMap<String, IpBucket> = BTreeMap::new();
        for log in self.logs_since(since_ms)? {
            let ip = log.ip.trim();
            if ip.is_empty() {
                continue;
            }
            let bucket = buckets.entry(ip.to_string()).or_default();
            bucket.usernames.insert(log.username);
            if !log.display_name.is_empty() {
                bucket.display_names.insert(log.display_name);
            }
            bucket.count += 1;
        }
        let mut items: Vec<IpCallRanking> = buckets
            .into_iter()
            .map(|(ip, bucket)| IpCallRanking {
                ip,
                username: join(&bucket.usernames),
                display_name: join(&bucket.display_names),
                count: bucket.count,
            })
            .collect();
        items.sort_by(|a, b| b.count.cmp(&a.count));
        truncate(&mut items, limit);
        Ok(items)
    }

    async fn user_minute_ip_ranking(
        &self,
        since_ms: i64,
        limit: i64,
    ) -> Result<Vec<UserMinuteIpRanking>, StorageError> {
        // (username, minute) -> 该分钟内的不同 IP
        let mut minutes: BTreeMap<(String, String), BTreeSet<String>> = BTreeMap::new();
        let mut display_names: BTreeMap<String, String> = BTreeMap::new();
        for log in self.logs_since(since_ms)? {
            let ip = log.ip.trim();
            if ip.is_empty() {
                continue;
            }
            if !log.display_name.is_empty() {
                display_names.insert(log.username.clone(), log.display_name.clone());
            }
            minutes
                .entry((log.username, minute_of(log.created_at_ms)))
                .or_default()
                .insert(ip.to_string());
        }

        let mut peaks: BTreeMap<String, (String, BTreeSet<String>)> = BTreeMap::new();
        for ((username, minute), ips) in minutes {
            match peaks.get(&username) {
                Some((_, best)) if best.len() >= ips.len() => {}
                _ => {
                    peaks.insert(username, (minute, ips));
                }
            }
        }

        let mut items: Vec<UserMinuteIpRanking> = peaks
            .into_iter()
            .map(|(username, (minute, ips))| UserMinuteIpRanking {
                display_name: display_names.get(&username).cloned().unwrap_or_default(),
                username,
                ip: join(&ips),
                ip_count: ips.len() as i64,
                minute,
            })
            .collect();
        items.sort_by(|a, b| b.ip_count.cmp(&a.ip_count));
        truncate(&mut items, limit);
        Ok(items)
    }
}
