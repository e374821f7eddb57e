//! 动态分组倍率配置（持久化形态）。
//!
//! 该结构与设置项 `DynamicGroupRatioSetting` 的 JSON 一一对应，
//! 编辑、校验、求值逻辑见 `relay-ratio`。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 默认时区（北京时间）。
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";

/// 可选时区列表：(IANA 名称, 展示标签)。
pub const TIMEZONE_OPTIONS: &[(&str, &str)] = &[
    ("Asia/Shanghai", "Asia/Shanghai (UTC+8)"),
    ("Asia/Tokyo", "Asia/Tokyo (UTC+9)"),
    ("Asia/Singapore", "Asia/Singapore (UTC+8)"),
    ("Europe/London", "Europe/London (UTC+0)"),
    ("Europe/Paris", "Europe/Paris (UTC+1)"),
    ("America/New_York", "America/New_York (UTC-5)"),
    ("America/Los_Angeles", "America/Los_Angeles (UTC-8)"),
    ("UTC", "UTC"),
];

/// 动态倍率模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioMode {
    /// 未启用动态倍率，等价于 `enabled = false`。
    None,
    /// 按时间段。
    #[default]
    Time,
    /// 按用户 RPM 区间。
    Rpm,
}

impl RatioMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RatioMode::None => "none",
            RatioMode::Time => "time",
            RatioMode::Rpm => "rpm",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(RatioMode::None),
            "time" => Some(RatioMode::Time),
            "rpm" => Some(RatioMode::Rpm),
            _ => None,
        }
    }
}

/// 时间段倍率：`start_hour` 含，`end_hour` 不含；起点大于终点表示跨午夜。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_hour: i32,
    pub end_hour: i32,
    pub ratio: f64,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start_hour: 0,
            end_hour: 24,
            ratio: 1.0,
        }
    }
}

/// RPM 区间倍率：`min_rpm` 含，`max_rpm` 不含，`-1` 表示无上限。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpmRange {
    pub min_rpm: i64,
    pub max_rpm: i64,
    pub ratio: f64,
}

impl RpmRange {
    pub const UNBOUNDED: i64 = -1;

    pub fn is_unbounded(&self) -> bool {
        self.max_rpm == Self::UNBOUNDED
    }
}

impl Default for RpmRange {
    fn default() -> Self {
        Self {
            min_rpm: 0,
            max_rpm: Self::UNBOUNDED,
            ratio: 1.0,
        }
    }
}

/// 单个分组的动态倍率区间。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupRatioRanges {
    #[serde(default)]
    pub time_ranges: Vec<TimeRange>,
    #[serde(default)]
    pub rpm_ranges: Vec<RpmRange>,
}

/// 动态分组倍率总配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicRatioConfig {
    pub enabled: bool,
    pub mode: RatioMode,
    pub rpm_window_minutes: u32,
    pub timezone: String,
    #[serde(default)]
    pub group_configs: BTreeMap<String, GroupRatioRanges>,
}

impl DynamicRatioConfig {
    pub const MIN_RPM_WINDOW_MINUTES: u32 = 1;
    pub const MAX_RPM_WINDOW_MINUTES: u32 = 60;

    /// 服务端初始状态：未加载任何设置前不启用动态倍率。
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            mode: RatioMode::None,
            ..Self::default()
        }
    }

    /// 是否处于生效状态（启用且模式不为 none）。
    pub fn is_active(&self) -> bool {
        self.enabled && self.mode != RatioMode::None
    }

    /// 已配置的分组名（按键序）。
    pub fn configured_groups(&self) -> Vec<String> {
        self.group_configs.keys().cloned().collect()
    }
}

impl Default for DynamicRatioConfig {
    /// 编辑器默认值：首次切换到动态倍率时创建。
    fn default() -> Self {
        Self {
            enabled: true,
            mode: RatioMode::Time,
            rpm_window_minutes: Self::MIN_RPM_WINDOW_MINUTES,
            timezone: DEFAULT_TIMEZONE.to_string(),
            group_configs: BTreeMap::new(),
        }
    }
}
