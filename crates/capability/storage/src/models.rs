//! 数据模型
//!
//! - 设置项：OptionRecord
//! - 调用日志：LogRecord（排行榜聚合的数据来源）

/// 设置项记录（options 表的一行）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRecord {
    pub key: String,
    pub value: String,
}

impl OptionRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// 单次调用日志。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogRecord {
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    /// 客户端 IP，可为空。
    pub ip: String,
    /// 输入 + 输出 token 数。
    pub tokens: i64,
    pub quota: i64,
    pub created_at_ms: i64,
}
