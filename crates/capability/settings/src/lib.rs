//! 分组倍率设置。
//!
//! - [`bag`]：设置项键值集合
//! - [`session`]：编辑会话（原始值 + 草稿）与差异计算
//! - [`validate`]：表单校验
//! - [`groups`]：静态分组倍率与用户可用分组

pub mod bag;
pub mod groups;
pub mod session;
pub mod validate;

pub use bag::{OptionValue, SettingsBag};
pub use groups::{GroupRatioSettings, USER_GROUP_DESCRIPTION};
pub use session::{ChangedField, EditSession, PricingMode, diff};
pub use validate::{validate_auto_groups, validate_option, verify_json};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{key}: {message}")]
    Invalid { key: String, message: String },
}
