//! 设置项内存实现

use crate::error::StorageError;
use crate::models::OptionRecord;
use crate::traits::OptionStore;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// 设置项内存存储
pub struct InMemoryOptionStore {
    options: RwLock<BTreeMap<String, String>>,
}

impl InMemoryOptionStore {
    pub fn new() -> Self {
        Self {
            options: RwLock::new(BTreeMap::new()),
        }
    }

    /// 使用初始设置项创建存储。
    pub fn with_options<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            options: RwLock::new(
                options
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }
}

impl Default for InMemoryOptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl OptionStore for InMemoryOptionStore {
    async fn list_options(&self) -> Result<Vec<OptionRecord>, StorageError> {
        let options = self
            .options
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(options
            .iter()
            .map(|(key, value)| OptionRecord::new(key.clone(), value.clone()))
            .collect())
    }

    async fn get_option(&self, key: &str) -> Result<Option<String>, StorageError> {
        let options = self
            .options
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(options.get(key).cloned())
    }

    async fn put_option(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut options = self
            .options
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        options.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
