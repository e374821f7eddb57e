//! 今日排行榜：聚合构建、IP 脱敏、缓存与展示行。

pub mod build;
pub mod display;
pub mod mask;
pub mod service;

pub use build::{build_user_call_ranking, build_user_ip_count_ranking, build_user_token_ranking};
pub use display::{Medal, RankRow, display_name, ip_user_names, rank_rows};
pub use mask::{mask_ip, mask_ips, mask_ranking};
pub use service::{DEFAULT_CACHE_SECONDS, DEFAULT_LIMIT, RankingService, day_start_ms};

use relay_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("ranking query failed: {0}")]
    Storage(#[from] StorageError),
}
