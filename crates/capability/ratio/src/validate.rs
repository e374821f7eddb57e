//! 服务端严格校验。
//!
//! 与编辑器的宽松解析不同，这里任何不合法的字段都会拒绝整份配置。

use crate::RatioError;
use domain::{DynamicRatioConfig, GroupRatioRanges, RatioMode};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
struct StrictSetting {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    mode: String,
    #[serde(default)]
    rpm_window_minutes: i64,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    group_configs: Option<BTreeMap<String, GroupRatioRanges>>,
}

/// 解析并校验设置文本，通过后返回配置。
pub fn validate_str(raw: &str) -> Result<DynamicRatioConfig, RatioError> {
    let setting: StrictSetting = serde_json::from_str(raw)?;
    let mode = RatioMode::parse(&setting.mode)
        .ok_or_else(|| RatioError::Invalid("invalid mode, must be none/time/rpm".to_string()))?;
    let rpm_window_minutes = u32::try_from(setting.rpm_window_minutes)
        .map_err(|_| RatioError::Invalid("rpm_window_minutes must be >= 1".to_string()))?;
    let config = DynamicRatioConfig {
        enabled: setting.enabled,
        mode,
        rpm_window_minutes,
        timezone: setting.timezone,
        group_configs: setting.group_configs.unwrap_or_default(),
    };
    validate(&config)?;
    Ok(config)
}

/// 校验配置；只检查当前模式用到的区间。
pub fn validate(config: &DynamicRatioConfig) -> Result<(), RatioError> {
    if config.rpm_window_minutes < DynamicRatioConfig::MIN_RPM_WINDOW_MINUTES {
        return Err(RatioError::Invalid(
            "rpm_window_minutes must be >= 1".to_string(),
        ));
    }
    if config.rpm_window_minutes > DynamicRatioConfig::MAX_RPM_WINDOW_MINUTES {
        return Err(RatioError::Invalid(
            "rpm_window_minutes must be <= 60".to_string(),
        ));
    }

    for (group, ranges) in &config.group_configs {
        match config.mode {
            RatioMode::Time => {
                for (i, range) in ranges.time_ranges.iter().enumerate() {
                    if !(0..=23).contains(&range.start_hour) || !(0..=24).contains(&range.end_hour)
                    {
                        return Err(RatioError::Invalid(format!(
                            "group {group} time_ranges[{i}]: hour must be 0-23 for start, 0-24 for end"
                        )));
                    }
                    check_ratio(range.ratio, group, "time_ranges", i)?;
                }
            }
            RatioMode::Rpm => {
                for (i, range) in ranges.rpm_ranges.iter().enumerate() {
                    if range.min_rpm < 0 {
                        return Err(RatioError::Invalid(format!(
                            "group {group} rpm_ranges[{i}]: min_rpm must be >= 0"
                        )));
                    }
                    if !range.is_unbounded() && range.max_rpm <= range.min_rpm {
                        return Err(RatioError::Invalid(format!(
                            "group {group} rpm_ranges[{i}]: max_rpm must be > min_rpm or -1"
                        )));
                    }
                    check_ratio(range.ratio, group, "rpm_ranges", i)?;
                }
            }
            RatioMode::None => {}
        }
    }
    Ok(())
}

fn check_ratio(ratio: f64, group: &str, kind: &str, index: usize) -> Result<(), RatioError> {
    if ratio.is_nan() || ratio < 0.0 {
        return Err(RatioError::Invalid(format!(
            "group {group} {kind}[{index}]: ratio must be >= 0"
        )));
    }
    Ok(())
}
