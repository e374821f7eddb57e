//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use domain::RankingData as RankingDto;

/// 标准 API 响应封装。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }

    /// 失败时的错误信息（无错误体时给出通用文案）。
    pub fn error_message(&self) -> Option<String> {
        if self.success {
            return None;
        }
        Some(
            self.error
                .as_ref()
                .map(|err| err.message.clone())
                .unwrap_or_else(|| "request failed".to_string()),
        )
    }
}

/// 设置项（值统一为字符串）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDto {
    pub key: String,
    pub value: String,
}

/// 设置项更新请求体。
///
/// `value` 接受字符串、布尔或数字，落库前统一转为字符串。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOptionRequest {
    pub key: String,
    pub value: Value,
}

impl UpdateOptionRequest {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Value::String(value.into()),
        }
    }

    /// 将请求值转为持久化字符串。
    pub fn value_string(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// 分组倍率展示值：数值或文案（auto 分组显示"自动"）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatioDisplay {
    Value(f64),
    Label(String),
}

/// 用户可用分组条目。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGroupDto {
    pub ratio: RatioDisplay,
    pub desc: String,
    pub is_dynamic: bool,
}

/// 用户可用分组查询参数。
#[derive(Debug, Default, Deserialize)]
pub struct UserGroupQuery {
    pub group: Option<String>,
}

/// 首页实时统计。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatsDto {
    pub rpm: u64,
    pub default_ratio: f64,
    pub is_dynamic: bool,
}

impl Default for SystemStatsDto {
    fn default() -> Self {
        Self {
            rpm: 0,
            default_ratio: 1.0,
            is_dynamic: false,
        }
    }
}

/// 转发请求上报：写入请求速率与调用日志。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordRequestDto {
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub tokens: i64,
    #[serde(default)]
    pub quota: i64,
}

/// 进程内计数器快照。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshotDto {
    pub options_written: u64,
    pub option_write_failures: u64,
    pub config_fallbacks: u64,
    pub ranking_cache_hits: u64,
    pub ranking_cache_misses: u64,
    pub ranking_query_latency_ms_total: u64,
    pub ranking_query_latency_ms_count: u64,
    pub dynamic_ratio_hits: u64,
    pub requests_recorded: u64,
}
