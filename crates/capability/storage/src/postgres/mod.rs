//! # PostgreSQL 存储实现模块
//!
//! 生产环境使用；所有查询使用参数绑定。
//!
//! ## 数据库模式要求
//!
//! - `options`：设置项表（key text primary key, value text not null）
//! - `logs`：调用日志表（user_id bigint, username text, display_name text,
//!   ip text, tokens bigint, quota bigint, created_at bigint 毫秒时间戳）
//!
//! 建议索引：`logs(created_at)`、`logs(username, created_at)`。

pub mod option;
pub mod ranking;

pub use option::*;
pub use ranking::*;
