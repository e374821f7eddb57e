//! 请求速率内存实现

use crate::error::StorageError;
use crate::traits::RequestRateStore;
use crate::RATE_RETENTION_MS;
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

/// 按用户保存最近一小时的请求时间戳（毫秒，按写入顺序）。
pub struct InMemoryRequestRateStore {
    requests: RwLock<HashMap<i64, VecDeque<i64>>>,
}

impl InMemoryRequestRateStore {
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(HashMap::new()),
        }
    }

    /// 当前仍有记录的用户数。
    pub fn tracked_users(&self) -> Result<usize, StorageError> {
        let requests = self
            .requests
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(requests.len())
    }
}

impl Default for InMemoryRequestRateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RequestRateStore for InMemoryRequestRateStore {
    async fn record_request(&self, user_id: i64, at_ms: i64) -> Result<(), StorageError> {
        let mut requests = self
            .requests
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        requests.entry(user_id).or_default().push_back(at_ms);
        // 所有用户一起清理，过期用户整条移除
        let cutoff = at_ms - RATE_RETENTION_MS;
        requests.retain(|_, entries| {
            while entries.front().is_some_and(|ts| *ts < cutoff) {
                entries.pop_front();
            }
            !entries.is_empty()
        });
        Ok(())
    }

    async fn count_since(&self, user_id: i64, since_ms: i64) -> Result<u64, StorageError> {
        let requests = self
            .requests
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(requests
            .get(&user_id)
            .map(|entries| entries.iter().filter(|ts| **ts >= since_ms).count() as u64)
            .unwrap_or(0))
    }

    async fn count_all_since(&self, since_ms: i64) -> Result<u64, StorageError> {
        let requests = self
            .requests
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(requests
            .values()
            .map(|entries| entries.iter().filter(|ts| **ts >= since_ms).count() as u64)
            .sum())
    }
}
