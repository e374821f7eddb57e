//! 宽松解析与规范序列化。
//!
//! 解析从不向调用方报错：整体无法解析时返回编辑器默认配置，
//! 单个字段缺失或类型不对时回落到该字段默认值。

use domain::{
    DEFAULT_TIMEZONE, DynamicRatioConfig, GroupRatioRanges, RatioMode, RpmRange, TimeRange,
};
use relay_telemetry::record_config_fallback;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// 从 JSON 字符串解析。
pub fn parse_str(raw: &str) -> DynamicRatioConfig {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => parse_object(&value),
        Err(err) => {
            warn!(error = %err, "failed to parse DynamicGroupRatioSetting, using defaults");
            record_config_fallback();
            DynamicRatioConfig::default()
        }
    }
}

/// 从原始值解析：既可以是 JSON 字符串，也可以是已解码的对象。
pub fn parse_value(raw: &Value) -> DynamicRatioConfig {
    match raw {
        Value::String(text) => parse_str(text),
        other => parse_object(other),
    }
}

/// 规范持久化形态：完整配置的缩进 JSON。
pub fn serialize(config: &DynamicRatioConfig) -> String {
    match serde_json::to_string_pretty(config) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "failed to serialize DynamicGroupRatioSetting");
            "{}".to_string()
        }
    }
}

fn parse_object(value: &Value) -> DynamicRatioConfig {
    let Some(object) = value.as_object() else {
        warn!("DynamicGroupRatioSetting is not a JSON object, using defaults");
        record_config_fallback();
        return DynamicRatioConfig::default();
    };
    let defaults = DynamicRatioConfig::default();

    // 仅显式 false 才视为关闭
    let enabled = !matches!(object.get("enabled"), Some(Value::Bool(false)));

    let mode = match object.get("mode").and_then(Value::as_str) {
        None | Some("") => defaults.mode,
        Some(text) => RatioMode::parse(text).unwrap_or_else(|| {
            warn!(mode = text, "unknown dynamic ratio mode, using time");
            defaults.mode
        }),
    };

    let rpm_window_minutes = object
        .get("rpm_window_minutes")
        .and_then(integral)
        .filter(|minutes| *minutes > 0)
        .and_then(|minutes| u32::try_from(minutes).ok())
        .unwrap_or(defaults.rpm_window_minutes);

    let timezone = object
        .get("timezone")
        .and_then(Value::as_str)
        .filter(|tz| !tz.is_empty())
        .unwrap_or(DEFAULT_TIMEZONE)
        .to_string();

    let group_configs = object
        .get("group_configs")
        .and_then(Value::as_object)
        .map(parse_groups)
        .unwrap_or_default();

    DynamicRatioConfig {
        enabled,
        mode,
        rpm_window_minutes,
        timezone,
        group_configs,
    }
}

fn parse_groups(groups: &Map<String, Value>) -> BTreeMap<String, GroupRatioRanges> {
    let mut result = BTreeMap::new();
    for (name, value) in groups {
        let Some(group) = value.as_object() else {
            warn!(group = %name, "group config is not an object, skipped");
            continue;
        };
        let time_ranges = items(group.get("time_ranges"))
            .map(parse_time_range)
            .collect();
        let rpm_ranges = items(group.get("rpm_ranges")).map(parse_rpm_range).collect();
        result.insert(
            name.clone(),
            GroupRatioRanges {
                time_ranges,
                rpm_ranges,
            },
        );
    }
    result
}

fn items(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn parse_time_range(item: &Map<String, Value>) -> TimeRange {
    let defaults = TimeRange::default();
    TimeRange {
        start_hour: int_field(item, "start_hour").unwrap_or(defaults.start_hour),
        end_hour: int_field(item, "end_hour").unwrap_or(defaults.end_hour),
        ratio: item
            .get("ratio")
            .and_then(Value::as_f64)
            .unwrap_or(defaults.ratio),
    }
}

fn parse_rpm_range(item: &Map<String, Value>) -> RpmRange {
    let defaults = RpmRange::default();
    RpmRange {
        min_rpm: item
            .get("min_rpm")
            .and_then(integral)
            .unwrap_or(defaults.min_rpm),
        max_rpm: item
            .get("max_rpm")
            .and_then(integral)
            .unwrap_or(defaults.max_rpm),
        ratio: item
            .get("ratio")
            .and_then(Value::as_f64)
            .unwrap_or(defaults.ratio),
    }
}

fn int_field(item: &Map<String, Value>, key: &str) -> Option<i32> {
    item.get(key)
        .and_then(integral)
        .and_then(|value| i32::try_from(value).ok())
}

/// 整数，或小数部分为 0 的浮点数（如 `5.0`）。
fn integral(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    let number = value.as_f64()?;
    if number.fract() == 0.0 && number >= i64::MIN as f64 && number < i64::MAX as f64 {
        Some(number as i64)
    } else {
        None
    }
}
