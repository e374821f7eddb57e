use domain::{DynamicRatioConfig, RatioMode};
use relay_ratio::{
    DisablePolicy, GroupView, RangeEdit, RangeKind, RatioEditor, available_groups, parse_str,
};
use serde_json::json;

#[test]
fn group_view_after_load() {
    let available = available_groups(r#"{"default":1,"vip":0.5}"#);
    let editor = RatioEditor::load(&json!({
        "enabled": true,
        "mode": "time",
        "group_configs": {"vip": {"time_ranges": [], "rpm_ranges": []}}
    }));

    assert_eq!(editor.selected_group(), Some("vip"));
    assert_eq!(
        editor.group_view(&available),
        GroupView {
            configured: vec!["vip".to_string()],
            addable: vec!["default".to_string()],
        }
    );
}

#[test]
fn unparsable_group_ratio_has_no_available_groups() {
    assert!(available_groups("{oops").is_empty());
    assert!(available_groups("").is_empty());
    assert!(available_groups("[1,2]").is_empty());
}

#[test]
fn editing_returns_serialized_value() {
    let mut editor = RatioEditor::load(&json!(""));
    assert_eq!(editor.config(), &DynamicRatioConfig::default());
    assert_eq!(editor.selected_group(), None);

    let value = editor.add_group("vip").expect("new group");
    assert_eq!(editor.selected_group(), Some("vip"));
    assert!(parse_str(&value).group_configs.contains_key("vip"));
    assert!(editor.add_group("vip").is_none());

    editor.add_range(RangeKind::Time).expect("add range");
    let value = editor
        .update_range(RangeKind::Time, 0, RangeEdit::StartHour(22))
        .expect("update");
    assert_eq!(parse_str(&value).group_configs["vip"].time_ranges[0].start_hour, 22);
    assert_eq!(editor.current_ranges().time_ranges[0].start_hour, 22);

    let value = editor.set_mode(RatioMode::Rpm);
    assert_eq!(parse_str(&value).mode, RatioMode::Rpm);
    assert_eq!(editor.value(), value);
}

#[test]
fn remove_group_moves_selection() {
    let mut editor = RatioEditor::load(&json!({
        "group_configs": {"a": {}, "b": {}, "c": {}}
    }));
    assert!(editor.select_group("b"));
    assert!(!editor.select_group("zzz"));
    editor.remove_group("b");
    assert_eq!(editor.selected_group(), Some("a"));
    editor.remove_group("a");
    editor.remove_group("c");
    assert_eq!(editor.selected_group(), None);
    assert!(editor.add_range(RangeKind::Rpm).is_err());
}

#[test]
fn reload_keeps_selection() {
    let mut editor = RatioEditor::load(&json!({"group_configs": {"a": {}, "b": {}}}));
    editor.select_group("b");
    editor.reload(&json!({"group_configs": {"a": {}, "b": {}, "c": {}}}));
    assert_eq!(editor.selected_group(), Some("b"));
}

#[test]
fn toggle_through_editor() {
    let mut editor = RatioEditor::load(&json!({"enabled": false, "mode": "none"}));
    let value = editor.toggle_dynamic_mode(true, DisablePolicy::KeepMode);
    let config = parse_str(&value);
    assert!(config.enabled);
    assert_eq!(config.mode, RatioMode::Time);

    let value = editor.toggle_dynamic_mode(false, DisablePolicy::KeepMode);
    let config = parse_str(&value);
    assert!(!config.enabled);
    assert_eq!(config.mode, RatioMode::Time);
}

#[test]
fn window_through_editor() {
    let mut editor = RatioEditor::default();
    let value = editor.set_rpm_window(Some(90));
    assert_eq!(parse_str(&value).rpm_window_minutes, 60);
    let value = editor.set_timezone("Asia/Tokyo");
    assert_eq!(parse_str(&value).timezone, "Asia/Tokyo");
}
