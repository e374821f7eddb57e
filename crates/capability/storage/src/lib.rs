//! # Relay Storage 模块
//!
//! 统一的数据存储抽象层：
//!
//! 1. **接口抽象层** (`traits.rs`)：OptionStore / RankingStore / RequestRateStore
//! 2. **数据模型层** (`models.rs`)：设置项与调用日志
//! 3. **错误处理层** (`error.rs`)：统一的 `StorageError`
//! 4. **连接管理层** (`connection.rs`)：Postgres 连接池
//! 5. **实现层**：
//!    - `in_memory/`：内存实现（未配置数据库时使用，也用于测试）
//!    - `postgres/`：`options` 与 `logs` 表
//!    - `redis`：请求时间戳列表
//!
//! ```rust,ignore
//! use relay_storage::{InMemoryOptionStore, OptionStore};
//!
//! let store = InMemoryOptionStore::with_options([("GroupRatio", r#"{"default":1}"#)]);
//! let value = store.get_option("GroupRatio").await?;
//! ```

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod redis;
pub mod traits;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use crate::redis::RedisRequestRateStore;
pub use traits::*;

pub use in_memory::{InMemoryOptionStore, InMemoryRankingStore, InMemoryRequestRateStore};
pub use postgres::{PgOptionStore, PgRankingStore};

/// 请求时间戳的保留时长（RPM 窗口上限 60 分钟）。
pub const RATE_RETENTION_MS: i64 = 60 * 60_000;
