//! 管理端 HTTP 客户端。
//!
//! - [`ConsoleClient`]：读取设置、批量保存、读取排行榜与统计
//! - [`RankingBoard`]：排行榜展示状态，刷新失败时保留旧数据
//! - [`StatsPoller`]：定时拉取首页统计

pub mod board;
pub mod client;
pub mod poller;

pub use board::RankingBoard;
pub use client::ConsoleClient;
pub use poller::{DEFAULT_POLL_INTERVAL, StatsPoller};

use relay_settings::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("没有需要保存的改动")]
    NothingChanged,
    #[error(transparent)]
    Invalid(#[from] SettingsError),
    /// 批量保存中任一请求失败。
    #[error("保存失败：{0}")]
    Save(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Api(String),
}
