//! 动态倍率求值。
//!
//! 返回 `None` 表示不使用动态倍率（未启用、分组未配置、区间为空或没有命中），
//! 调用方回落到静态倍率。

use crate::rule::{ActiveRule, active_rule};
use crate::validate::validate_str;
use crate::RatioError;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use domain::{DEFAULT_TIMEZONE, DynamicRatioConfig, RpmRange, TimeRange};
use relay_storage::RequestRateStore;
use relay_telemetry::record_dynamic_ratio_hit;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// 区间重叠时的命中策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// 按配置顺序取第一个命中的区间。
    #[default]
    FirstMatch,
    /// 取最后一个命中的区间。
    LastMatch,
    /// 取跨度最小的命中区间，跨度相同取靠前者。
    Narrowest,
}

impl MatchStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" | "first_match" => Some(MatchStrategy::FirstMatch),
            "last" | "last_match" => Some(MatchStrategy::LastMatch),
            "narrowest" => Some(MatchStrategy::Narrowest),
            _ => None,
        }
    }
}

/// 小时是否落在 `[start, end)`；`start > end` 表示跨午夜（如 22 - 6）。
pub fn hour_in_range(hour: i32, start: i32, end: i32) -> bool {
    if start <= end {
        return hour >= start && hour < end;
    }
    hour >= start || hour < end
}

pub fn select_time_range(
    ranges: &[TimeRange],
    hour: i32,
    strategy: MatchStrategy,
) -> Option<&TimeRange> {
    let mut matches = ranges
        .iter()
        .filter(|range| hour_in_range(hour, range.start_hour, range.end_hour));
    match strategy {
        MatchStrategy::FirstMatch => matches.next(),
        MatchStrategy::LastMatch => matches.last(),
        MatchStrategy::Narrowest => matches.min_by_key(|range| time_span(range)),
    }
}

pub fn select_rpm_range(
    ranges: &[RpmRange],
    rpm: i64,
    strategy: MatchStrategy,
) -> Option<&RpmRange> {
    let mut matches = ranges
        .iter()
        .filter(|range| rpm >= range.min_rpm && (range.is_unbounded() || rpm < range.max_rpm));
    match strategy {
        MatchStrategy::FirstMatch => matches.next(),
        MatchStrategy::LastMatch => matches.last(),
        MatchStrategy::Narrowest => matches.min_by_key(|range| rpm_span(range)),
    }
}

fn time_span(range: &TimeRange) -> i32 {
    if range.start_hour <= range.end_hour {
        range.end_hour - range.start_hour
    } else {
        24 - range.start_hour + range.end_hour
    }
}

fn rpm_span(range: &RpmRange) -> i64 {
    if range.is_unbounded() {
        i64::MAX
    } else {
        range.max_rpm - range.min_rpm
    }
}

/// 指定时区的当前小时；时区无法识别时按北京时间。
pub fn current_hour(timezone: &str, now: DateTime<Utc>) -> i32 {
    let tz = timezone.parse::<Tz>().unwrap_or_else(|_| {
        debug!(timezone, "unknown timezone, falling back to {DEFAULT_TIMEZONE}");
        chrono_tz::Asia::Shanghai
    });
    now.with_timezone(&tz).hour() as i32
}

/// 运行时倍率求值器：持有当前生效的配置。
pub struct RatioEvaluator {
    config: RwLock<DynamicRatioConfig>,
    strategy: MatchStrategy,
    rates: Arc<dyn RequestRateStore>,
}

impl RatioEvaluator {
    pub fn new(rates: Arc<dyn RequestRateStore>, strategy: MatchStrategy) -> Self {
        Self::with_config(rates, strategy, DynamicRatioConfig::disabled())
    }

    pub fn with_config(
        rates: Arc<dyn RequestRateStore>,
        strategy: MatchStrategy,
        config: DynamicRatioConfig,
    ) -> Self {
        Self {
            config: RwLock::new(config),
            strategy,
            rates,
        }
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    pub fn snapshot(&self) -> DynamicRatioConfig {
        match self.config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn replace(&self, config: DynamicRatioConfig) {
        match self.config.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    /// 校验设置文本并整体替换当前配置。
    pub fn load_str(&self, raw: &str) -> Result<(), RatioError> {
        let config = validate_str(raw)?;
        self.replace(config);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.snapshot().is_active()
    }

    /// 分组当前的动态倍率；`user_id` 为空时 RPM 按全站请求数计算。
    pub async fn group_ratio(&self, group: &str, user_id: Option<i64>) -> Option<f64> {
        self.group_ratio_at(group, user_id, Utc::now()).await
    }

    pub async fn group_ratio_at(
        &self,
        group: &str,
        user_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> Option<f64> {
        let ratio = match active_rule(&self.snapshot()) {
            ActiveRule::None => None,
            ActiveRule::Time {
                timezone,
                per_group,
            } => {
                let ranges = per_group.get(group)?;
                let hour = current_hour(&timezone, now);
                select_time_range(ranges, hour, self.strategy).map(|range| range.ratio)
            }
            ActiveRule::Rpm {
                window_minutes,
                per_group,
            } => {
                let ranges = per_group.get(group)?;
                if ranges.is_empty() {
                    return None;
                }
                let rpm = self.current_rpm(user_id, window_minutes, now).await;
                select_rpm_range(ranges, rpm, self.strategy).map(|range| range.ratio)
            }
        };
        if ratio.is_some() {
            record_dynamic_ratio_hit();
        }
        ratio
    }

    /// 窗口内的请求数；存储不可用时按 0 处理。
    async fn current_rpm(&self, user_id: Option<i64>, window_minutes: u32, now: DateTime<Utc>) -> i64 {
        let since_ms = now.timestamp_millis() - i64::from(window_minutes) * 60_000;
        let result = match user_id {
            Some(user_id) => self.rates.count_since(user_id, since_ms).await,
            None => self.rates.count_all_since(since_ms).await,
        };
        match result {
            Ok(count) => i64::try_from(count).unwrap_or(i64::MAX),
            Err(err) => {
                warn!(error = %err, "request rate lookup failed, treating rpm as 0");
                0
            }
        }
    }
}
