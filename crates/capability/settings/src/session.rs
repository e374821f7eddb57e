//! 编辑会话：原始值快照 + 草稿。
//!
//! 提交时只发送草稿中与原始值不同的字段。

use crate::bag::{OptionValue, SettingsBag};
use crate::validate::validate_option;
use crate::SettingsError;
use domain::DynamicRatioConfig;
use domain::options::DYNAMIC_GROUP_RATIO_SETTING;
use relay_ratio::edit::toggle_dynamic_mode;
use relay_ratio::{DisablePolicy, RatioEditor, parse_value, serialize};
use serde_json::Value;

/// 一个待提交的改动。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedField {
    pub key: String,
    pub value: OptionValue,
}

impl ChangedField {
    pub fn wire_value(&self) -> String {
        self.value.to_wire()
    }
}

/// 计算草稿相对原始值的改动（按键排序）。
pub fn diff(original: &SettingsBag, draft: &SettingsBag) -> Vec<ChangedField> {
    draft
        .iter()
        .filter(|(key, value)| original.get(key) != Some(*value))
        .map(|(key, value)| ChangedField {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

/// 分组倍率的计费方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMode {
    Static,
    Dynamic,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditSession {
    original: SettingsBag,
    draft: SettingsBag,
}

impl EditSession {
    pub fn new(bag: SettingsBag) -> Self {
        Self {
            original: bag.clone(),
            draft: bag,
        }
    }

    pub fn original(&self) -> &SettingsBag {
        &self.original
    }

    pub fn draft(&self) -> &SettingsBag {
        &self.draft
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.draft.set(key, value);
    }

    pub fn changes(&self) -> Vec<ChangedField> {
        diff(&self.original, &self.draft)
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes().is_empty()
    }

    /// 校验草稿中的全部文本字段，遇到第一个错误即返回。
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (key, value) in self.draft.iter() {
            if let OptionValue::Text(text) = value {
                validate_option(key, text)?;
            }
        }
        Ok(())
    }

    /// 保存成功后以草稿作为新的原始值。
    pub fn commit(&mut self) {
        self.original = self.draft.clone();
    }

    /// 用服务端最新值重置会话。
    pub fn reset(&mut self, bag: SettingsBag) {
        *self = Self::new(bag);
    }

    /// 当前草稿的计费方式：动态倍率开启且模式不为 none 时为动态。
    pub fn pricing_mode(&self) -> PricingMode {
        let text = self.draft.text(DYNAMIC_GROUP_RATIO_SETTING);
        let Some(object) = setting_object(text) else {
            return PricingMode::Static;
        };
        let enabled = object.get("enabled") == Some(&Value::Bool(true));
        let mode = object.get("mode").and_then(Value::as_str).unwrap_or("");
        if enabled && !mode.is_empty() && mode != "none" {
            PricingMode::Dynamic
        } else {
            PricingMode::Static
        }
    }

    /// 切换静态 / 动态计费，返回新的设置文本。
    ///
    /// 现有设置无法解析时写入全新配置：动态为编辑器默认值，
    /// 静态为关闭状态的完整配置（`enabled = false`，`mode = none`）。
    pub fn switch_pricing_mode(&mut self, mode: PricingMode, policy: DisablePolicy) -> String {
        let enable = mode == PricingMode::Dynamic;
        let text = self.draft.text(DYNAMIC_GROUP_RATIO_SETTING);
        let next = match setting_object(text) {
            Some(object) => {
                let current = parse_value(&object);
                serialize(&toggle_dynamic_mode(&current, enable, policy))
            }
            None if enable => serialize(&DynamicRatioConfig::default()),
            None => serialize(&DynamicRatioConfig::disabled()),
        };
        self.draft.set(DYNAMIC_GROUP_RATIO_SETTING, next.clone());
        next
    }

    /// 以草稿中的动态倍率设置打开编辑器。
    pub fn ratio_editor(&self) -> RatioEditor {
        RatioEditor::load(&Value::String(
            self.draft.text(DYNAMIC_GROUP_RATIO_SETTING).to_string(),
        ))
    }

    /// 写回编辑器产出的设置文本。
    pub fn apply_ratio_value(&mut self, value: String) {
        self.draft.set(DYNAMIC_GROUP_RATIO_SETTING, value);
    }
}

/// 空文本按 `{}` 处理；不是 JSON 对象时返回 None。
fn setting_object(text: &str) -> Option<Value> {
    let text = if text.trim().is_empty() { "{}" } else { text };
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}
