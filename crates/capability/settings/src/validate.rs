//! 表单校验：失败时阻止提交，不修改任何状态。

use crate::SettingsError;
use domain::options::{AUTO_GROUPS, is_json_object_key};
use serde_json::Value;

pub const INVALID_JSON_MESSAGE: &str = "不是合法的 JSON 字符串";
pub const INVALID_AUTO_GROUPS_MESSAGE: &str = r#"必须是有效的 JSON 字符串数组，例如：["g1","g2"]"#;

/// 空文本视为合法；否则必须是 JSON 对象或数组。
pub fn verify_json(text: &str) -> bool {
    if text.trim().is_empty() {
        return true;
    }
    matches!(
        serde_json::from_str::<Value>(text),
        Ok(Value::Object(_) | Value::Array(_))
    )
}

/// 空文本视为合法；否则必须是字符串数组。
pub fn validate_auto_groups(text: &str) -> bool {
    if text.trim().is_empty() {
        return true;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items.iter().all(Value::is_string),
        _ => false,
    }
}

/// 按键选择校验规则；未列出的键不校验。
pub fn validate_option(key: &str, text: &str) -> Result<(), SettingsError> {
    let message = if is_json_object_key(key) && !verify_json(text) {
        INVALID_JSON_MESSAGE
    } else if key == AUTO_GROUPS && !validate_auto_groups(text) {
        INVALID_AUTO_GROUPS_MESSAGE
    } else {
        return Ok(());
    };
    Err(SettingsError::Invalid {
        key: key.to_string(),
        message: message.to_string(),
    })
}
