//! 数据库连接管理

use crate::error::StorageError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// 建立 Postgres 连接池（最大连接数 8）。
pub async fn connect_pool(database_url: &str) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}
