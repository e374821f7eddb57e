//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 区间重叠时可选的命中策略名。
pub const MATCH_STRATEGIES: &[&str] = &["first", "last", "narrowest"];

/// 应用运行配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub http_addr: String,
    /// 未配置时使用内存存储。
    pub database_url: Option<String>,
    /// 未配置时请求速率使用内存存储。
    pub redis_url: Option<String>,
    pub admin_token: String,
    pub ranking_limit: i64,
    pub ranking_cache_seconds: u64,
    pub ratio_match_strategy: String,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置（便于测试）。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_token = read_optional(&lookup, "RELAY_ADMIN_TOKEN")
            .ok_or_else(|| ConfigError::Missing("RELAY_ADMIN_TOKEN".to_string()))?;
        let http_addr =
            read_optional(&lookup, "RELAY_HTTP_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let database_url = read_optional(&lookup, "RELAY_DATABASE_URL");
        let redis_url = read_optional(&lookup, "RELAY_REDIS_URL");
        let ranking_limit = read_i64_with_default(&lookup, "RELAY_RANKING_LIMIT", 100)?;
        if ranking_limit <= 0 {
            return Err(ConfigError::Invalid(
                "RELAY_RANKING_LIMIT".to_string(),
                ranking_limit.to_string(),
            ));
        }
        let ranking_cache_seconds =
            read_u64_with_default(&lookup, "RELAY_RANKING_CACHE_SECONDS", 300)?;
        let ratio_match_strategy = read_optional(&lookup, "RELAY_RATIO_MATCH_STRATEGY")
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_else(|| "first".to_string());
        if !MATCH_STRATEGIES.contains(&ratio_match_strategy.as_str()) {
            return Err(ConfigError::Invalid(
                "RELAY_RATIO_MATCH_STRATEGY".to_string(),
                ratio_match_strategy,
            ));
        }

        Ok(Self {
            http_addr,
            database_url,
            redis_url,
            admin_token,
            ranking_limit,
            ranking_cache_seconds,
            ratio_match_strategy,
        })
    }
}

fn read_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_i64_with_default<F>(lookup: &F, key: &str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = read_optional(lookup, key) else {
        return Ok(default);
    };
    value
        .parse::<i64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = read_optional(lookup, key) else {
        return Ok(default);
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}
