//! 编辑会话：当前配置 + 当前选中的分组。
//!
//! 每次修改都会产出新的序列化文本，交给外层表单保存。

use crate::edit::{self, DisablePolicy, RangeEdit, RangeKind};
use crate::groups::GroupView;
use crate::parse::{parse_value, serialize};
use crate::RatioError;
use domain::{DynamicRatioConfig, GroupRatioRanges, RatioMode};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct RatioEditor {
    config: DynamicRatioConfig,
    selected_group: Option<String>,
}

impl RatioEditor {
    /// 加载原始设置值，并默认选中第一个已配置分组。
    pub fn load(raw: &Value) -> Self {
        let mut editor = Self::default();
        editor.reload(raw);
        editor
    }

    pub fn from_config(config: DynamicRatioConfig) -> Self {
        let selected_group = config.group_configs.keys().next().cloned();
        Self {
            config,
            selected_group,
        }
    }

    /// 外部设置值变化时重新解析；已有选中分组时保持不变。
    pub fn reload(&mut self, raw: &Value) {
        self.config = parse_value(raw);
        if self.selected_group.is_none() {
            self.selected_group = self.config.group_configs.keys().next().cloned();
        }
    }

    pub fn config(&self) -> &DynamicRatioConfig {
        &self.config
    }

    pub fn selected_group(&self) -> Option<&str> {
        self.selected_group.as_deref()
    }

    /// 切换选中分组；只能选中已配置的分组。
    pub fn select_group(&mut self, name: &str) -> bool {
        if self.config.group_configs.contains_key(name) {
            self.selected_group = Some(name.to_string());
            return true;
        }
        false
    }

    /// 当前序列化文本。
    pub fn value(&self) -> String {
        serialize(&self.config)
    }

    pub fn group_view(&self, available: &[String]) -> GroupView {
        GroupView::new(available, &self.config)
    }

    /// 当前选中分组的区间；未选中或不存在时为空。
    pub fn current_ranges(&self) -> GroupRatioRanges {
        self.selected_group
            .as_deref()
            .and_then(|group| self.config.group_configs.get(group))
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_mode(&mut self, mode: RatioMode) -> String {
        self.apply(edit::set_mode(&self.config, mode))
    }

    pub fn set_rpm_window(&mut self, minutes: Option<i64>) -> String {
        self.apply(edit::set_rpm_window(&self.config, minutes))
    }

    pub fn set_timezone(&mut self, timezone: &str) -> String {
        self.apply(edit::set_timezone(&self.config, timezone))
    }

    pub fn toggle_dynamic_mode(&mut self, enable: bool, policy: DisablePolicy) -> String {
        self.apply(edit::toggle_dynamic_mode(&self.config, enable, policy))
    }

    /// 添加分组并选中；空名称或已存在时不改动。
    pub fn add_group(&mut self, name: &str) -> Option<String> {
        if name.is_empty() || self.config.group_configs.contains_key(name) {
            return None;
        }
        let value = self.apply(edit::add_group(&self.config, name));
        self.selected_group = Some(name.to_string());
        Some(value)
    }

    /// 删除分组；选中项回落到第一个剩余分组。
    pub fn remove_group(&mut self, name: &str) -> String {
        let value = self.apply(edit::remove_group(&self.config, name));
        self.selected_group = self.config.group_configs.keys().next().cloned();
        value
    }

    pub fn add_range(&mut self, kind: RangeKind) -> Result<String, RatioError> {
        let group = self.require_selected()?;
        let next = edit::add_range(&self.config, &group, kind)?;
        Ok(self.apply(next))
    }

    pub fn update_range(
        &mut self,
        kind: RangeKind,
        index: usize,
        change: RangeEdit,
    ) -> Result<String, RatioError> {
        let group = self.require_selected()?;
        let next = edit::update_range(&self.config, &group, kind, index, change)?;
        Ok(self.apply(next))
    }

    pub fn delete_range(&mut self, kind: RangeKind, index: usize) -> Result<String, RatioError> {
        let group = self.require_selected()?;
        let next = edit::delete_range(&self.config, &group, kind, index)?;
        Ok(self.apply(next))
    }

    fn require_selected(&self) -> Result<String, RatioError> {
        self.selected_group
            .clone()
            .ok_or_else(|| RatioError::Invalid("no group selected".to_string()))
    }

    fn apply(&mut self, next: DynamicRatioConfig) -> String {
        self.config = next;
        self.value()
    }
}
