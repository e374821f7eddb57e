//! 设置项键名（与服务端 options 表的 key 一致）。

pub const GROUP_RATIO: &str = "GroupRatio";
pub const USER_USABLE_GROUPS: &str = "UserUsableGroups";
pub const GROUP_GROUP_RATIO: &str = "GroupGroupRatio";
pub const GROUP_SPECIAL_USABLE_GROUP: &str = "group_ratio_setting.group_special_usable_group";
pub const AUTO_GROUPS: &str = "AutoGroups";
pub const DEFAULT_USE_AUTO_GROUP: &str = "DefaultUseAutoGroup";
pub const DYNAMIC_GROUP_RATIO_SETTING: &str = "DynamicGroupRatioSetting";

/// 分组倍率设置页管理的全部键。
pub const GROUP_RATIO_KEYS: &[&str] = &[
    GROUP_RATIO,
    USER_USABLE_GROUPS,
    GROUP_GROUP_RATIO,
    GROUP_SPECIAL_USABLE_GROUP,
    AUTO_GROUPS,
    DEFAULT_USE_AUTO_GROUP,
    DYNAMIC_GROUP_RATIO_SETTING,
];

/// 以布尔值形式编辑、以字符串形式持久化的键。
pub fn is_bool_key(key: &str) -> bool {
    key == DEFAULT_USE_AUTO_GROUP
}

/// 需要是合法 JSON 对象的键。
pub fn is_json_object_key(key: &str) -> bool {
    matches!(
        key,
        GROUP_RATIO | USER_USABLE_GROUPS | GROUP_GROUP_RATIO | GROUP_SPECIAL_USABLE_GROUP
    )
}
