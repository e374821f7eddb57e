use domain::{DynamicRatioConfig, GroupRatioRanges, RatioMode, RpmRange, TimeRange};
use relay_ratio::edit::{
    add_group, add_rpm_range, add_time_range, delete_range, remove_group, set_rpm_window,
    set_timezone, toggle_dynamic_mode, update_range,
};
use relay_ratio::{
    DisablePolicy, RangeEdit, RangeKind, RatioError, parse_str, parse_value, serialize,
};
use serde_json::json;

fn sample() -> DynamicRatioConfig {
    let mut config = DynamicRatioConfig {
        mode: RatioMode::Rpm,
        rpm_window_minutes: 5,
        timezone: "UTC".to_string(),
        ..DynamicRatioConfig::default()
    };
    config.group_configs.insert(
        "vip".to_string(),
        GroupRatioRanges {
            time_ranges: vec![TimeRange {
                start_hour: 22,
                end_hour: 6,
                ratio: 0.5,
            }],
            rpm_ranges: vec![
                RpmRange {
                    min_rpm: 0,
                    max_rpm: 10,
                    ratio: 1.0,
                },
                RpmRange {
                    min_rpm: 10,
                    max_rpm: -1,
                    ratio: 1.5,
                },
            ],
        },
    );
    config.group_configs.insert("default".to_string(), GroupRatioRanges::default());
    config
}

#[test]
fn serialize_then_parse_round_trips() {
    for config in [
        sample(),
        DynamicRatioConfig::default(),
        DynamicRatioConfig::disabled(),
    ] {
        assert_eq!(parse_str(&serialize(&config)), config);
    }
}

#[test]
fn serialized_form_is_pretty_and_ordered() {
    let text = serialize(&sample());
    assert!(text.contains('\n'));
    let default_at = text.find("\"default\"").expect("default group");
    let vip_at = text.find("\"vip\"").expect("vip group");
    assert!(default_at < vip_at);
}

#[test]
fn add_group_is_idempotent() {
    let once = add_group(&sample(), "svip");
    let twice = add_group(&once, "svip");
    assert_eq!(once, twice);
    assert_eq!(once.group_configs["svip"], GroupRatioRanges::default());
    assert_eq!(add_group(&sample(), ""), sample());
}

#[test]
fn remove_then_add_yields_empty_ranges() {
    let removed = remove_group(&sample(), "vip");
    assert!(!removed.group_configs.contains_key("vip"));
    let added = add_group(&removed, "vip");
    assert_eq!(added.group_configs["vip"], GroupRatioRanges::default());
}

#[test]
fn rpm_window_is_clamped() {
    let config = sample();
    assert_eq!(set_rpm_window(&config, Some(0)).rpm_window_minutes, 1);
    assert_eq!(set_rpm_window(&config, None).rpm_window_minutes, 1);
    assert_eq!(set_rpm_window(&config, Some(90)).rpm_window_minutes, 60);
    assert_eq!(set_rpm_window(&config, Some(-4)).rpm_window_minutes, 1);
    assert_eq!(set_rpm_window(&config, Some(15)).rpm_window_minutes, 15);
}

#[test]
fn broken_json_yields_editor_default() {
    assert_eq!(parse_str("{not json"), DynamicRatioConfig::default());
    assert_eq!(parse_str(""), DynamicRatioConfig::default());
    assert_eq!(
        parse_value(&json!("{not json")),
        DynamicRatioConfig::default()
    );
}

#[test]
fn toggle_keeps_mode_when_disabling() {
    let none = DynamicRatioConfig {
        enabled: false,
        mode: RatioMode::None,
        ..DynamicRatioConfig::default()
    };
    let enabled = toggle_dynamic_mode(&none, true, DisablePolicy::KeepMode);
    assert!(enabled.enabled);
    assert_eq!(enabled.mode, RatioMode::Time);

    let disabled = toggle_dynamic_mode(&enabled, false, DisablePolicy::KeepMode);
    assert!(!disabled.enabled);
    assert_eq!(disabled.mode, RatioMode::Time);

    let reset = toggle_dynamic_mode(&enabled, false, DisablePolicy::ResetMode);
    assert!(!reset.enabled);
    assert_eq!(reset.mode, RatioMode::None);
}

#[test]
fn enabling_keeps_existing_mode() {
    let rpm = DynamicRatioConfig {
        enabled: false,
        ..sample()
    };
    let enabled = toggle_dynamic_mode(&rpm, true, DisablePolicy::KeepMode);
    assert_eq!(enabled.mode, RatioMode::Rpm);
}

#[test]
fn range_edits_do_not_touch_input() {
    let config = sample();
    let with_time = add_time_range(&config, "default").expect("add time");
    let with_rpm = add_rpm_range(&with_time, "default").expect("add rpm");
    assert_eq!(config.group_configs["default"], GroupRatioRanges::default());
    assert_eq!(with_rpm.group_configs["default"].time_ranges, vec![TimeRange::default()]);
    assert_eq!(with_rpm.group_configs["default"].rpm_ranges, vec![RpmRange::default()]);

    let updated = update_range(&config, "vip", RangeKind::Rpm, 1, RangeEdit::MaxRpm(50))
        .expect("update");
    assert_eq!(updated.group_configs["vip"].rpm_ranges[1].max_rpm, 50);
    assert_eq!(config.group_configs["vip"].rpm_ranges[1].max_rpm, -1);

    let deleted = delete_range(&config, "vip", RangeKind::Rpm, 0).expect("delete");
    assert_eq!(deleted.group_configs["vip"].rpm_ranges.len(), 1);
    assert_eq!(deleted.group_configs["vip"].rpm_ranges[0].min_rpm, 10);
}

#[test]
fn bad_range_edits_are_errors() {
    let config = sample();
    assert!(matches!(
        update_range(&config, "vip", RangeKind::Time, 3, RangeEdit::Ratio(2.0)),
        Err(RatioError::RangeIndexOutOfBounds { index: 3, len: 1, .. })
    ));
    assert!(matches!(
        update_range(&config, "vip", RangeKind::Time, 0, RangeEdit::MinRpm(3)),
        Err(RatioError::FieldKindMismatch { field: "min_rpm", .. })
    ));
    assert!(matches!(
        delete_range(&config, "nobody", RangeKind::Rpm, 0),
        Err(RatioError::UnknownGroup(group)) if group == "nobody"
    ));
}

#[test]
fn timezone_passes_through() {
    assert_eq!(set_timezone(&sample(), "Mars/Base").timezone, "Mars/Base");
}

#[test]
fn empty_timezone_becomes_default_and_round_trips() {
    let config = set_timezone(&sample(), "");
    assert_eq!(config.timezone, "Asia/Shanghai");
    assert_eq!(parse_str(&serialize(&config)), config);
}
