//! 今日排行榜记录。

use serde::{Deserialize, Serialize};

/// 用户维度聚合（一次查询生成三个用户排行榜）。
///
/// `ip` 为逗号分隔的去重 IP 列表。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserAggregate {
    pub username: String,
    pub display_name: String,
    pub ip: String,
    pub ip_count: i64,
    pub count: i64,
    pub tokens: i64,
    pub quota: i64,
}

/// 用户调用次数排行。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserCallRanking {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub ip_count: i64,
    pub count: i64,
}

/// IP 调用次数排行；`username` / `display_name` 为逗号分隔列表。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IpCallRanking {
    pub ip: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    pub count: i64,
}

/// 用户 Token 消耗排行。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserTokenRanking {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    pub tokens: i64,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub quota: i64,
}

/// 用户使用 IP 数排行。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserIpCountRanking {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub ip: String,
    pub ip_count: i64,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub tokens: i64,
    #[serde(default)]
    pub quota: i64,
}

/// 用户单分钟最大不同 IP 数排行。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserMinuteIpRanking {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub ip: String,
    pub ip_count: i64,
    /// 出现峰值的分钟（`YYYY-MM-DD HH:MM`）。
    #[serde(default)]
    pub minute: String,
}

/// 五个排行榜的整体快照。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankingData {
    #[serde(default)]
    pub user_call_ranking: Vec<UserCallRanking>,
    #[serde(default)]
    pub ip_call_ranking: Vec<IpCallRanking>,
    #[serde(default)]
    pub user_token_ranking: Vec<UserTokenRanking>,
    #[serde(default)]
    pub user_ip_count_ranking: Vec<UserIpCountRanking>,
    #[serde(default)]
    pub user_minute_ip_ranking: Vec<UserMinuteIpRanking>,
}
