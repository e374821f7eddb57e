//! 设置项键值集合。

use domain::options::{GROUP_RATIO_KEYS, is_bool_key};
use std::collections::BTreeMap;

/// 设置项的编辑态取值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Text(String),
    Bool(bool),
}

impl OptionValue {
    /// 提交到服务端的字符串形式。
    pub fn to_wire(&self) -> String {
        match self {
            OptionValue::Text(text) => text.clone(),
            OptionValue::Bool(flag) => flag.to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => Some(text),
            OptionValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(flag) => Some(*flag),
            OptionValue::Text(_) => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

/// 分组倍率设置页的全部字段（按键排序）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsBag {
    values: BTreeMap<String, OptionValue>,
}

impl SettingsBag {
    /// 空表单：文本字段为空串，布尔字段为 false。
    pub fn new() -> Self {
        let values = GROUP_RATIO_KEYS
            .iter()
            .map(|key| {
                let value = if is_bool_key(key) {
                    OptionValue::Bool(false)
                } else {
                    OptionValue::Text(String::new())
                };
                (key.to_string(), value)
            })
            .collect();
        Self { values }
    }

    /// 从服务端设置项列表构建；只保留本页管理的键。
    pub fn from_options<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut bag = Self::new();
        for (key, value) in options {
            let key = key.as_ref();
            if !GROUP_RATIO_KEYS.contains(&key) {
                continue;
            }
            let value = if is_bool_key(key) {
                OptionValue::Bool(value.as_ref() == "true")
            } else {
                OptionValue::Text(value.as_ref().to_string())
            };
            bag.values.insert(key.to_string(), value);
        }
        bag
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// 文本字段的值；缺失或为布尔字段时为空串。
    pub fn text(&self, key: &str) -> &str {
        self.values
            .get(key)
            .and_then(OptionValue::as_text)
            .unwrap_or("")
    }

    pub fn flag(&self, key: &str) -> bool {
        self.values
            .get(key)
            .and_then(OptionValue::as_bool)
            .unwrap_or(false)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for SettingsBag {
    fn default() -> Self {
        Self::new()
    }
}
