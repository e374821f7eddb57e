use domain::{DynamicRatioConfig, RatioMode, RpmRange, TimeRange};

#[test]
fn editor_default_enables_time_mode() {
    let config = DynamicRatioConfig::default();
    assert!(config.enabled);
    assert_eq!(config.mode, RatioMode::Time);
    assert_eq!(config.rpm_window_minutes, 1);
    assert_eq!(config.timezone, "Asia/Shanghai");
    assert!(config.group_configs.is_empty());
    assert!(config.is_active());
}

#[test]
fn runtime_default_is_inactive() {
    let config = DynamicRatioConfig::disabled();
    assert!(!config.enabled);
    assert_eq!(config.mode, RatioMode::None);
    assert!(!config.is_active());
}

#[test]
fn default_ranges() {
    assert_eq!(
        TimeRange::default(),
        TimeRange {
            start_hour: 0,
            end_hour: 24,
            ratio: 1.0
        }
    );
    let rpm = RpmRange::default();
    assert!(rpm.is_unbounded());
    assert_eq!(rpm.min_rpm, 0);
}

#[test]
fn mode_serializes_lowercase() {
    let value = serde_json::to_value(RatioMode::Rpm).expect("serialize");
    assert_eq!(value, serde_json::json!("rpm"));
    assert_eq!(RatioMode::parse("none"), Some(RatioMode::None));
    assert_eq!(RatioMode::parse("static"), None);
}

#[test]
fn group_ranges_default_when_absent() {
    let config: DynamicRatioConfig = serde_json::from_str(
        r#"{"enabled":true,"mode":"time","rpm_window_minutes":1,"timezone":"UTC",
            "group_configs":{"vip":{"time_ranges":[{"start_hour":0,"end_hour":8,"ratio":0.8}]}}}"#,
    )
    .expect("parse");
    let vip = config.group_configs.get("vip").expect("vip");
    assert_eq!(vip.time_ranges.len(), 1);
    assert!(vip.rpm_ranges.is_empty());
}
