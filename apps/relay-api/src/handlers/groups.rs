//! 分组 handlers
//!
//! - GET /api/group - 静态倍率中的全部分组名
//! - GET /api/user/groups?group= - 用户可用分组及当前倍率

use crate::AppState;
use crate::utils::response::{ok, storage_error};
use api_contract::{RatioDisplay, UserGroupDto, UserGroupQuery};
use axum::{
    extract::{Query, State},
    response::Response,
};
use relay_settings::GroupRatioSettings;
use relay_storage::StorageError;
use std::collections::BTreeMap;

/// auto 分组的倍率展示文案。
const AUTO_GROUP: &str = "auto";
const AUTO_RATIO_LABEL: &str = "自动";

pub(crate) async fn load_group_settings(
    state: &AppState,
) -> Result<GroupRatioSettings, StorageError> {
    let records = state.option_store.list_options().await?;
    Ok(GroupRatioSettings::from_options(
        records.iter().map(|record| (&record.key, &record.value)),
    ))
}

pub async fn list_groups(State(state): State<AppState>) -> Response {
    match load_group_settings(&state).await {
        Ok(settings) => ok(settings.group_names()),
        Err(err) => storage_error(err),
    }
}

pub async fn user_groups(
    State(state): State<AppState>,
    Query(query): Query<UserGroupQuery>,
) -> Response {
    let settings = match load_group_settings(&state).await {
        Ok(settings) => settings,
        Err(err) => return storage_error(err),
    };
    let user_group = query.group.unwrap_or_default();
    let usable = settings.usable_groups(&user_group);

    let mut groups = BTreeMap::new();
    for group in settings.group_ratio.keys() {
        let Some(desc) = usable.get(group) else {
            continue;
        };
        let (ratio, is_dynamic) = settings
            .effective_group_ratio(&state.evaluator, &user_group, group, None)
            .await;
        groups.insert(
            group.clone(),
            UserGroupDto {
                ratio: RatioDisplay::Value(ratio),
                desc: desc.clone(),
                is_dynamic,
            },
        );
    }
    if usable.contains_key(AUTO_GROUP) {
        groups.insert(
            AUTO_GROUP.to_string(),
            UserGroupDto {
                ratio: RatioDisplay::Label(AUTO_RATIO_LABEL.to_string()),
                desc: settings.usable_group_description(AUTO_GROUP),
                is_dynamic: false,
            },
        );
    }
    ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, state_with_options};
    use domain::options::{GROUP_GROUP_RATIO, GROUP_RATIO, USER_USABLE_GROUPS};

    fn state() -> AppState {
        state_with_options(&[
            (GROUP_RATIO, r#"{"default":1,"vip":0.5,"svip":0.2}"#),
            (GROUP_GROUP_RATIO, r#"{"vip":{"default":0.8}}"#),
            (
                USER_USABLE_GROUPS,
                r#"{"default":"默认分组","vip":"VIP 分组","auto":"自动选择"}"#,
            ),
        ])
    }

    #[tokio::test]
    async fn group_names_come_from_group_ratio() {
        let body = body_json(list_groups(State(state())).await).await;
        assert_eq!(body["data"], serde_json::json!(["default", "svip", "vip"]));
    }

    #[tokio::test]
    async fn user_groups_use_static_ratios_and_auto_label() {
        let query = UserGroupQuery {
            group: Some("vip".to_string()),
        };
        let body = body_json(user_groups(State(state()), Query(query)).await).await;
        let data = &body["data"];
        assert_eq!(data["default"]["ratio"], 0.8);
        assert_eq!(data["default"]["desc"], "默认分组");
        assert_eq!(data["vip"]["ratio"], 0.5);
        assert_eq!(data["vip"]["is_dynamic"], false);
        assert_eq!(data["auto"]["ratio"], "自动");
        assert_eq!(data["auto"]["desc"], "自动选择");
        assert!(data.get("svip").is_none());
    }

    #[tokio::test]
    async fn dynamic_ratio_is_flagged() {
        let state = state();
        state
            .evaluator
            .load_str(
                r#"{"enabled":true,"mode":"time","rpm_window_minutes":1,"timezone":"UTC",
                    "group_configs":{"vip":{"time_ranges":[{"start_hour":0,"end_hour":24,"ratio":3}]}}}"#,
            )
            .expect("valid setting");
        let query = UserGroupQuery {
            group: Some("default".to_string()),
        };
        let body = body_json(user_groups(State(state), Query(query)).await).await;
        assert_eq!(body["data"]["vip"]["ratio"], 3.0);
        assert_eq!(body["data"]["vip"]["is_dynamic"], true);
        assert_eq!(body["data"]["default"]["is_dynamic"], false);
    }
}
