//! 静态分组倍率与用户可用分组。
//!
//! 各设置项文本宽松解析：空文本或格式不对时按空集合处理并记录告警。

use crate::bag::SettingsBag;
use domain::options::{
    AUTO_GROUPS, DEFAULT_USE_AUTO_GROUP, GROUP_GROUP_RATIO, GROUP_RATIO,
    GROUP_SPECIAL_USABLE_GROUP, USER_USABLE_GROUPS,
};
use relay_ratio::RatioEvaluator;
use relay_telemetry::record_config_fallback;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::warn;

/// 用户自身分组不在可用列表中时补充的描述。
pub const USER_GROUP_DESCRIPTION: &str = "用户分组";

/// 未配置倍率的分组按 1 计费。
pub const DEFAULT_GROUP_RATIO: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupRatioSettings {
    /// 分组 -> 倍率
    pub group_ratio: BTreeMap<String, f64>,
    /// 用户分组 -> (分组 -> 倍率)
    pub group_group_ratio: BTreeMap<String, BTreeMap<String, f64>>,
    /// 分组 -> 描述
    pub user_usable_groups: BTreeMap<String, String>,
    /// 用户分组 -> (`+:g` / `-:g` / `g` -> 描述)
    pub special_usable_groups: BTreeMap<String, BTreeMap<String, String>>,
    pub auto_groups: Vec<String>,
    pub default_use_auto_group: bool,
}

fn lenient<T: DeserializeOwned + Default>(key: &str, text: &str) -> T {
    if text.trim().is_empty() {
        return T::default();
    }
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, error = %err, "failed to parse option, using empty value");
            record_config_fallback();
            T::default()
        }
    }
}

impl GroupRatioSettings {
    pub fn from_bag(bag: &SettingsBag) -> Self {
        Self {
            group_ratio: lenient(GROUP_RATIO, bag.text(GROUP_RATIO)),
            group_group_ratio: lenient(GROUP_GROUP_RATIO, bag.text(GROUP_GROUP_RATIO)),
            user_usable_groups: lenient(USER_USABLE_GROUPS, bag.text(USER_USABLE_GROUPS)),
            special_usable_groups: lenient(
                GROUP_SPECIAL_USABLE_GROUP,
                bag.text(GROUP_SPECIAL_USABLE_GROUP),
            ),
            auto_groups: lenient(AUTO_GROUPS, bag.text(AUTO_GROUPS)),
            default_use_auto_group: bag.flag(DEFAULT_USE_AUTO_GROUP),
        }
    }

    pub fn from_options<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_bag(&SettingsBag::from_options(options))
    }

    /// 静态倍率中配置的全部分组名。
    pub fn group_names(&self) -> Vec<String> {
        self.group_ratio.keys().cloned().collect()
    }

    /// 用户可用分组（分组 -> 描述）。
    ///
    /// 特殊规则按键序应用：`-:g` 移除、`+:g` 添加、无前缀直接添加；
    /// 用户自身分组始终可用。
    pub fn usable_groups(&self, user_group: &str) -> BTreeMap<String, String> {
        let mut groups = self.user_usable_groups.clone();
        if user_group.is_empty() {
            return groups;
        }
        if let Some(special) = self.special_usable_groups.get(user_group) {
            for (rule, desc) in special {
                if let Some(group) = rule.strip_prefix("-:") {
                    groups.remove(group);
                } else if let Some(group) = rule.strip_prefix("+:") {
                    groups.insert(group.to_string(), desc.clone());
                } else {
                    groups.insert(rule.clone(), desc.clone());
                }
            }
        }
        groups
            .entry(user_group.to_string())
            .or_insert_with(|| USER_GROUP_DESCRIPTION.to_string());
        groups
    }

    pub fn group_in_usable_groups(&self, user_group: &str, group: &str) -> bool {
        self.usable_groups(user_group).contains_key(group)
    }

    /// 自动分组中用户可用的部分，保持配置顺序。
    pub fn auto_groups_for(&self, user_group: &str) -> Vec<String> {
        let usable = self.usable_groups(user_group);
        self.auto_groups
            .iter()
            .filter(|group| usable.contains_key(group.as_str()))
            .cloned()
            .collect()
    }

    /// 可用分组的描述；未配置时用分组名本身。
    pub fn usable_group_description(&self, group: &str) -> String {
        self.user_usable_groups
            .get(group)
            .cloned()
            .unwrap_or_else(|| group.to_string())
    }

    /// 静态倍率：优先 `GroupGroupRatio[user_group][group]`，其次 `GroupRatio[group]`。
    pub fn group_ratio(&self, user_group: &str, group: &str) -> f64 {
        if let Some(ratio) = self
            .group_group_ratio
            .get(user_group)
            .and_then(|ratios| ratios.get(group))
        {
            return *ratio;
        }
        self.group_ratio
            .get(group)
            .copied()
            .unwrap_or(DEFAULT_GROUP_RATIO)
    }

    /// 实际生效倍率：动态倍率命中时返回 `(倍率, true)`，否则回落到静态倍率。
    pub async fn effective_group_ratio(
        &self,
        evaluator: &RatioEvaluator,
        user_group: &str,
        group: &str,
        user_id: Option<i64>,
    ) -> (f64, bool) {
        match evaluator.group_ratio(group, user_id).await {
            Some(ratio) => (ratio, true),
            None => (self.group_ratio(user_group, group), false),
        }
    }
}
