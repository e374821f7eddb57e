//! Postgres 设置项实现

use crate::error::StorageError;
use crate::models::OptionRecord;
use crate::traits::OptionStore;
use sqlx::{PgPool, Row};

pub struct PgOptionStore {
    pub pool: PgPool,
}

impl PgOptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OptionStore for PgOptionStore {
    async fn list_options(&self) -> Result<Vec<OptionRecord>, StorageError> {
        let rows = sqlx::query("select key, value from options order by key")
            .fetch_all(&self.pool)
            .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(OptionRecord {
                key: row.try_get("key")?,
                value: row.try_get("value")?,
            });
        }
        Ok(items)
    }

    async fn get_option(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("select value from options where key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    async fn put_option(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            "insert into options (key, value) values ($1, $2) \
             on conflict (key) do update set value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
