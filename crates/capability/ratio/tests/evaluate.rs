use chrono::{DateTime, TimeZone, Utc};
use domain::{DynamicRatioConfig, GroupRatioRanges, RatioMode, RpmRange, TimeRange};
use relay_ratio::{
    ActiveRule, MatchStrategy, RatioEvaluator, active_rule, hour_in_range, select_rpm_range,
    select_time_range,
};
use relay_storage::{InMemoryRequestRateStore, RequestRateStore};
use std::sync::Arc;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, 30, 0)
        .single()
        .expect("valid time")
}

fn time_config(timezone: &str, ranges: Vec<TimeRange>) -> DynamicRatioConfig {
    let mut config = DynamicRatioConfig {
        timezone: timezone.to_string(),
        ..DynamicRatioConfig::default()
    };
    config.group_configs.insert(
        "vip".to_string(),
        GroupRatioRanges {
            time_ranges: ranges,
            rpm_ranges: Vec::new(),
        },
    );
    config
}

fn rpm_config(ranges: Vec<RpmRange>) -> DynamicRatioConfig {
    let mut config = DynamicRatioConfig {
        mode: RatioMode::Rpm,
        rpm_window_minutes: 1,
        ..DynamicRatioConfig::default()
    };
    config.group_configs.insert(
        "vip".to_string(),
        GroupRatioRanges {
            time_ranges: Vec::new(),
            rpm_ranges: ranges,
        },
    );
    config
}

fn time(start_hour: i32, end_hour: i32, ratio: f64) -> TimeRange {
    TimeRange {
        start_hour,
        end_hour,
        ratio,
    }
}

fn rpm(min_rpm: i64, max_rpm: i64, ratio: f64) -> RpmRange {
    RpmRange {
        min_rpm,
        max_rpm,
        ratio,
    }
}

#[test]
fn hour_ranges_wrap_midnight() {
    assert!(hour_in_range(23, 22, 6));
    assert!(hour_in_range(3, 22, 6));
    assert!(!hour_in_range(6, 22, 6));
    assert!(hour_in_range(0, 0, 24));
    assert!(hour_in_range(23, 0, 24));
    assert!(!hour_in_range(5, 5, 5));
}

#[test]
fn overlap_strategies() {
    let ranges = vec![time(0, 24, 1.0), time(20, 23, 2.0), time(22, 23, 3.0)];
    let pick = |strategy| select_time_range(&ranges, 22, strategy).map(|r| r.ratio);
    assert_eq!(pick(MatchStrategy::FirstMatch), Some(1.0));
    assert_eq!(pick(MatchStrategy::LastMatch), Some(3.0));
    assert_eq!(pick(MatchStrategy::Narrowest), Some(3.0));

    let rpm_ranges = vec![rpm(0, -1, 1.0), rpm(5, 50, 2.0), rpm(5, 50, 4.0)];
    let pick = |strategy| select_rpm_range(&rpm_ranges, 10, strategy).map(|r| r.ratio);
    assert_eq!(pick(MatchStrategy::FirstMatch), Some(1.0));
    assert_eq!(pick(MatchStrategy::Narrowest), Some(2.0));
    assert!(select_rpm_range(&rpm_ranges[1..], 50, MatchStrategy::FirstMatch).is_none());
}

#[test]
fn strategy_names() {
    assert_eq!(MatchStrategy::parse("first"), Some(MatchStrategy::FirstMatch));
    assert_eq!(MatchStrategy::parse("LAST"), Some(MatchStrategy::LastMatch));
    assert_eq!(MatchStrategy::parse("narrowest"), Some(MatchStrategy::Narrowest));
    assert_eq!(MatchStrategy::parse("random"), None);
}

#[test]
fn active_rule_drops_unused_kind() {
    let rule = active_rule(&time_config("UTC", vec![time(0, 12, 0.8)]));
    match rule {
        ActiveRule::Time {
            timezone,
            per_group,
        } => {
            assert_eq!(timezone, "UTC");
            assert_eq!(per_group["vip"], vec![time(0, 12, 0.8)]);
        }
        other => panic!("expected time rule, got {other:?}"),
    }
    assert!(active_rule(&DynamicRatioConfig::disabled()).is_none());
    let switched_off = DynamicRatioConfig {
        enabled: false,
        ..time_config("UTC", Vec::new())
    };
    assert!(active_rule(&switched_off).is_none());
}

#[tokio::test]
async fn time_mode_uses_configured_timezone() {
    let rates = Arc::new(InMemoryRequestRateStore::new());
    let evaluator = RatioEvaluator::with_config(
        rates,
        MatchStrategy::FirstMatch,
        time_config("Asia/Shanghai", vec![time(22, 6, 0.5)]),
    );
    // 14:30 UTC = 22:30 北京时间
    assert_eq!(evaluator.group_ratio_at("vip", None, at(14)).await, Some(0.5));
    assert_eq!(evaluator.group_ratio_at("vip", None, at(2)).await, None);
    assert_eq!(evaluator.group_ratio_at("default", None, at(14)).await, None);
}

#[tokio::test]
async fn unknown_timezone_falls_back_to_shanghai() {
    let rates = Arc::new(InMemoryRequestRateStore::new());
    let evaluator = RatioEvaluator::with_config(
        rates,
        MatchStrategy::FirstMatch,
        time_config("Nowhere/Land", vec![time(22, 23, 0.5)]),
    );
    assert_eq!(evaluator.group_ratio_at("vip", None, at(14)).await, Some(0.5));
}

#[tokio::test]
async fn rpm_mode_counts_user_requests() {
    let rates = Arc::new(InMemoryRequestRateStore::new());
    let now = at(10);
    for offset in 0..12 {
        rates
            .record_request(7, now.timestamp_millis() - offset * 1_000)
            .await
            .expect("record");
    }
    // 窗口之外
    rates
        .record_request(7, now.timestamp_millis() - 120_000)
        .await
        .expect("record");

    let evaluator = RatioEvaluator::with_config(
        rates,
        MatchStrategy::FirstMatch,
        rpm_config(vec![rpm(0, 10, 1.0), rpm(10, -1, 1.5)]),
    );
    assert_eq!(evaluator.group_ratio_at("vip", Some(7), now).await, Some(1.5));
    assert_eq!(evaluator.group_ratio_at("vip", Some(8), now).await, Some(1.0));
    assert_eq!(evaluator.group_ratio_at("vip", None, now).await, Some(1.5));
}

#[tokio::test]
async fn empty_ranges_and_disabled_fall_back() {
    let rates = Arc::new(InMemoryRequestRateStore::new());
    let evaluator = RatioEvaluator::new(rates, MatchStrategy::FirstMatch);
    assert!(!evaluator.is_active());
    assert_eq!(evaluator.group_ratio_at("vip", Some(1), at(1)).await, None);

    evaluator.replace(rpm_config(Vec::new()));
    assert!(evaluator.is_active());
    assert_eq!(evaluator.group_ratio_at("vip", Some(1), at(1)).await, None);
}

#[tokio::test]
async fn load_str_rejects_invalid_and_keeps_previous() {
    let rates = Arc::new(InMemoryRequestRateStore::new());
    let evaluator = RatioEvaluator::new(rates, MatchStrategy::FirstMatch);
    evaluator
        .load_str(
            r#"{"enabled":true,"mode":"time","rpm_window_minutes":1,"timezone":"UTC",
                "group_configs":{"vip":{"time_ranges":[{"start_hour":0,"end_hour":24,"ratio":2}]}}}"#,
        )
        .expect("valid setting");
    assert_eq!(evaluator.group_ratio_at("vip", None, at(3)).await, Some(2.0));

    let err = evaluator
        .load_str(r#"{"enabled":true,"mode":"time","rpm_window_minutes":1,
            "group_configs":{"vip":{"time_ranges":[{"start_hour":25,"end_hour":24,"ratio":2}]}}}"#)
        .expect_err("hour out of range");
    assert!(err.to_string().contains("group vip time_ranges[0]"));
    assert_eq!(evaluator.snapshot().timezone, "UTC");
}
