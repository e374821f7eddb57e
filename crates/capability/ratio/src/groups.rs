//! 可配置分组视图。
//!
//! 可用分组来自静态分组倍率（`GroupRatio`）的键集合；
//! 已配置分组为 `group_configs` 的键集合。

use domain::DynamicRatioConfig;
use serde_json::{Map, Value};
use tracing::debug;

/// 从 `GroupRatio` 文本取可用分组；空文本或无法解析时为空列表。
pub fn available_groups(group_ratio: &str) -> Vec<String> {
    if group_ratio.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Map<String, Value>>(group_ratio) {
        Ok(map) => map.keys().cloned().collect(),
        Err(err) => {
            debug!(error = %err, "GroupRatio is not a JSON object, no available groups");
            Vec::new()
        }
    }
}

/// 可添加分组：可用但尚未配置的分组，保持可用列表的顺序。
pub fn addable_groups(available: &[String], config: &DynamicRatioConfig) -> Vec<String> {
    available
        .iter()
        .filter(|group| !config.group_configs.contains_key(group.as_str()))
        .cloned()
        .collect()
}

/// 分组选择视图。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupView {
    pub configured: Vec<String>,
    pub addable: Vec<String>,
}

impl GroupView {
    pub fn new(available: &[String], config: &DynamicRatioConfig) -> Self {
        Self {
            configured: config.configured_groups(),
            addable: addable_groups(available, config),
        }
    }
}
