//! 设置项 handlers
//!
//! - GET /api/option - 列出设置项
//! - PUT /api/option - 更新单个设置项
//!
//! 两个接口都需要管理令牌。`DynamicGroupRatioSetting` 严格校验后
//! 立即替换运行中的倍率配置。

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::{bad_request_error, ok, storage_error};
use api_contract::{OptionDto, UpdateOptionRequest};
use axum::{Json, extract::State, http::HeaderMap, response::Response};
use domain::options::DYNAMIC_GROUP_RATIO_SETTING;
use relay_ratio::validate_str;
use relay_settings::validate_option;
use relay_telemetry::{record_option_write_failure, record_option_written};
use tracing::{info, warn};

pub async fn list_options(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.option_store.list_options().await {
        Ok(records) => {
            let data: Vec<OptionDto> = records
                .into_iter()
                .map(|record| OptionDto {
                    key: record.key,
                    value: record.value,
                })
                .collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

pub async fn update_option(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateOptionRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let key = req.key.trim().to_string();
    if key.is_empty() {
        return bad_request_error("key is required");
    }
    let value = req.value_string();

    let dynamic = if key == DYNAMIC_GROUP_RATIO_SETTING {
        match validate_str(&value) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(error = %err, "rejected DynamicGroupRatioSetting");
                record_option_write_failure();
                return bad_request_error(err.to_string());
            }
        }
    } else {
        if let Err(err) = validate_option(&key, &value) {
            record_option_write_failure();
            return bad_request_error(err.to_string());
        }
        None
    };

    if let Err(err) = state.option_store.put_option(&key, &value).await {
        record_option_write_failure();
        return storage_error(err);
    }
    if let Some(config) = dynamic {
        state.evaluator.replace(config);
        info!(
            active = state.evaluator.is_active(),
            "dynamic group ratio reloaded"
        );
    }
    record_option_written();
    info!(key = %key, "option updated");
    ok(())
}
