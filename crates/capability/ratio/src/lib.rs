//! 动态分组倍率配置模型。
//!
//! - [`parse`]：宽松解析（失败降级为默认配置并记录告警）与规范序列化
//! - [`edit`]：纯函数式编辑操作（每次返回新的完整配置）
//! - [`editor`]：编辑会话（配置 + 当前选中分组）
//! - [`groups`]：可用分组 / 可添加分组视图
//! - [`validate`]：服务端严格校验
//! - [`rule`]：按模式区分的规则视图
//! - [`evaluate`]：倍率求值与区间重叠策略

pub mod edit;
pub mod editor;
pub mod evaluate;
pub mod groups;
pub mod parse;
pub mod rule;
pub mod validate;

pub use edit::{DisablePolicy, RangeEdit, RangeKind};
pub use editor::RatioEditor;
pub use evaluate::{MatchStrategy, RatioEvaluator, hour_in_range, select_rpm_range, select_time_range};
pub use groups::{GroupView, addable_groups, available_groups};
pub use parse::{parse_str, parse_value, serialize};
pub use rule::{ActiveRule, active_rule};
pub use validate::{validate, validate_str};

/// 动态倍率配置错误。
#[derive(Debug, thiserror::Error)]
pub enum RatioError {
    #[error("group {0} is not configured")]
    UnknownGroup(String),
    #[error("group {group} {kind}[{index}] out of bounds (len {len})")]
    RangeIndexOutOfBounds {
        group: String,
        kind: RangeKind,
        index: usize,
        len: usize,
    },
    #[error("field {field} does not belong to {kind}")]
    FieldKindMismatch { field: &'static str, kind: RangeKind },
    #[error("{0}")]
    Invalid(String),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
