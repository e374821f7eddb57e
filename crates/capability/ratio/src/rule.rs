//! 按模式区分的规则视图。
//!
//! 持久化形态同时保留两类区间；求值时只关心当前模式对应的那一类。

use domain::{DynamicRatioConfig, RatioMode, RpmRange, TimeRange};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum ActiveRule {
    /// 未启用或模式为 none：使用静态倍率。
    None,
    Time {
        timezone: String,
        per_group: BTreeMap<String, Vec<TimeRange>>,
    },
    Rpm {
        window_minutes: u32,
        per_group: BTreeMap<String, Vec<RpmRange>>,
    },
}

impl ActiveRule {
    pub fn is_none(&self) -> bool {
        matches!(self, ActiveRule::None)
    }
}

pub fn active_rule(config: &DynamicRatioConfig) -> ActiveRule {
    if !config.is_active() {
        return ActiveRule::None;
    }
    match config.mode {
        RatioMode::None => ActiveRule::None,
        RatioMode::Time => ActiveRule::Time {
            timezone: config.timezone.clone(),
            per_group: config
                .group_configs
                .iter()
                .map(|(group, ranges)| (group.clone(), ranges.time_ranges.clone()))
                .collect(),
        },
        RatioMode::Rpm => ActiveRule::Rpm {
            window_minutes: config.rpm_window_minutes,
            per_group: config
                .group_configs
                .iter()
                .map(|(group, ranges)| (group.clone(), ranges.rpm_ranges.clone()))
                .collect(),
        },
    }
}
