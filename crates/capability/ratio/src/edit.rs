//! 编辑操作。
//!
//! 所有操作接收只读配置并返回新的完整配置，调用方持有的配置不会被修改。

use crate::RatioError;
use domain::{
    DEFAULT_TIMEZONE, DynamicRatioConfig, GroupRatioRanges, RatioMode, RpmRange, TimeRange,
};
use std::fmt;

/// 区间类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Time,
    Rpm,
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeKind::Time => write!(f, "time_ranges"),
            RangeKind::Rpm => write!(f, "rpm_ranges"),
        }
    }
}

/// 单个区间字段的修改（字段 + 新值）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeEdit {
    StartHour(i32),
    EndHour(i32),
    MinRpm(i64),
    MaxRpm(i64),
    Ratio(f64),
}

impl RangeEdit {
    pub fn field(&self) -> &'static str {
        match self {
            RangeEdit::StartHour(_) => "start_hour",
            RangeEdit::EndHour(_) => "end_hour",
            RangeEdit::MinRpm(_) => "min_rpm",
            RangeEdit::MaxRpm(_) => "max_rpm",
            RangeEdit::Ratio(_) => "ratio",
        }
    }

    fn applies_to(&self, kind: RangeKind) -> bool {
        match self {
            RangeEdit::StartHour(_) | RangeEdit::EndHour(_) => kind == RangeKind::Time,
            RangeEdit::MinRpm(_) | RangeEdit::MaxRpm(_) => kind == RangeKind::Rpm,
            RangeEdit::Ratio(_) => true,
        }
    }
}

/// 关闭动态倍率时对 `mode` 的处理方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisablePolicy {
    /// 仅置 `enabled = false`，保留模式以便再次开启。
    #[default]
    KeepMode,
    /// 同时把模式重置为 `none`。
    ResetMode,
}

pub fn set_mode(config: &DynamicRatioConfig, mode: RatioMode) -> DynamicRatioConfig {
    DynamicRatioConfig {
        mode,
        ..config.clone()
    }
}

/// 设置 RPM 窗口：限制在 [1, 60]，空值视为 1。
pub fn set_rpm_window(config: &DynamicRatioConfig, minutes: Option<i64>) -> DynamicRatioConfig {
    let min = i64::from(DynamicRatioConfig::MIN_RPM_WINDOW_MINUTES);
    let max = i64::from(DynamicRatioConfig::MAX_RPM_WINDOW_MINUTES);
    let clamped = minutes.unwrap_or(min).clamp(min, max);
    DynamicRatioConfig {
        rpm_window_minutes: u32::try_from(clamped)
            .unwrap_or(DynamicRatioConfig::MIN_RPM_WINDOW_MINUTES),
        ..config.clone()
    }
}

/// 设置时区；不校验是否在可选列表内，空值视为默认时区。
pub fn set_timezone(config: &DynamicRatioConfig, timezone: impl Into<String>) -> DynamicRatioConfig {
    let timezone = timezone.into();
    DynamicRatioConfig {
        timezone: if timezone.is_empty() {
            DEFAULT_TIMEZONE.to_string()
        } else {
            timezone
        },
        ..config.clone()
    }
}

/// 添加分组；名称为空或已存在时不做任何改动。
pub fn add_group(config: &DynamicRatioConfig, name: &str) -> DynamicRatioConfig {
    let mut next = config.clone();
    if name.is_empty() || next.group_configs.contains_key(name) {
        return next;
    }
    next.group_configs
        .insert(name.to_string(), GroupRatioRanges::default());
    next
}

pub fn remove_group(config: &DynamicRatioConfig, name: &str) -> DynamicRatioConfig {
    let mut next = config.clone();
    next.group_configs.remove(name);
    next
}

/// 为分组追加一个默认区间。
pub fn add_range(
    config: &DynamicRatioConfig,
    group: &str,
    kind: RangeKind,
) -> Result<DynamicRatioConfig, RatioError> {
    let mut next = config.clone();
    let ranges = group_mut(&mut next, group)?;
    match kind {
        RangeKind::Time => ranges.time_ranges.push(TimeRange::default()),
        RangeKind::Rpm => ranges.rpm_ranges.push(RpmRange::default()),
    }
    Ok(next)
}

pub fn add_time_range(
    config: &DynamicRatioConfig,
    group: &str,
) -> Result<DynamicRatioConfig, RatioError> {
    add_range(config, group, RangeKind::Time)
}

pub fn add_rpm_range(
    config: &DynamicRatioConfig,
    group: &str,
) -> Result<DynamicRatioConfig, RatioError> {
    add_range(config, group, RangeKind::Rpm)
}

/// 修改指定区间的单个字段；`index` 必须指向已有区间。
pub fn update_range(
    config: &DynamicRatioConfig,
    group: &str,
    kind: RangeKind,
    index: usize,
    edit: RangeEdit,
) -> Result<DynamicRatioConfig, RatioError> {
    if !edit.applies_to(kind) {
        return Err(RatioError::FieldKindMismatch {
            field: edit.field(),
            kind,
        });
    }
    let mut next = config.clone();
    let ranges = group_mut(&mut next, group)?;
    match kind {
        RangeKind::Time => {
            let len = ranges.time_ranges.len();
            let range = ranges
                .time_ranges
                .get_mut(index)
                .ok_or_else(|| out_of_bounds(group, kind, index, len))?;
            match edit {
                RangeEdit::StartHour(value) => range.start_hour = value,
                RangeEdit::EndHour(value) => range.end_hour = value,
                RangeEdit::Ratio(value) => range.ratio = value,
                RangeEdit::MinRpm(_) | RangeEdit::MaxRpm(_) => {}
            }
        }
        RangeKind::Rpm => {
            let len = ranges.rpm_ranges.len();
            let range = ranges
                .rpm_ranges
                .get_mut(index)
                .ok_or_else(|| out_of_bounds(group, kind, index, len))?;
            match edit {
                RangeEdit::MinRpm(value) => range.min_rpm = value,
                RangeEdit::MaxRpm(value) => range.max_rpm = value,
                RangeEdit::Ratio(value) => range.ratio = value,
                RangeEdit::StartHour(_) | RangeEdit::EndHour(_) => {}
            }
        }
    }
    Ok(next)
}

/// 删除指定区间，其余区间保持原有顺序。
pub fn delete_range(
    config: &DynamicRatioConfig,
    group: &str,
    kind: RangeKind,
    index: usize,
) -> Result<DynamicRatioConfig, RatioError> {
    let mut next = config.clone();
    let ranges = group_mut(&mut next, group)?;
    let len = match kind {
        RangeKind::Time => ranges.time_ranges.len(),
        RangeKind::Rpm => ranges.rpm_ranges.len(),
    };
    if index >= len {
        return Err(out_of_bounds(group, kind, index, len));
    }
    match kind {
        RangeKind::Time => {
            ranges.time_ranges.remove(index);
        }
        RangeKind::Rpm => {
            ranges.rpm_ranges.remove(index);
        }
    }
    Ok(next)
}

/// 静态 / 动态倍率切换。
pub fn toggle_dynamic_mode(
    config: &DynamicRatioConfig,
    enable: bool,
    policy: DisablePolicy,
) -> DynamicRatioConfig {
    let mut next = config.clone();
    if enable {
        next.enabled = true;
        if next.mode == RatioMode::None {
            next.mode = RatioMode::Time;
        }
    } else {
        next.enabled = false;
        if policy == DisablePolicy::ResetMode {
            next.mode = RatioMode::None;
        }
    }
    next
}

fn group_mut<'a>(
    config: &'a mut DynamicRatioConfig,
    group: &str,
) -> Result<&'a mut GroupRatioRanges, RatioError> {
    config
        .group_configs
        .get_mut(group)
        .ok_or_else(|| RatioError::UnknownGroup(group.to_string()))
}

fn out_of_bounds(group: &str, kind: RangeKind, index: usize, len: usize) -> RatioError {
    RatioError::RangeIndexOutOfBounds {
        group: group.to_string(),
        kind,
        index,
        len,
    }
}
