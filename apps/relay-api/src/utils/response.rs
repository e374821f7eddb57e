//! HTTP 响应辅助函数
//!
//! 所有错误返回统一的 ApiResponse 格式，HTTP 状态码与错误码对应。

use api_contract::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_ranking::RankingError;
use relay_storage::StorageError;

/// 认证错误响应
pub fn auth_error(status: StatusCode) -> Response {
    (
        status,
        Json(ApiResponse::<()>::error(
            "AUTH.UNAUTHORIZED",
            "unauthorized",
        )),
    )
        .into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 存储错误响应
pub fn storage_error(err: StorageError) -> Response {
    let message = err.to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

pub fn ranking_error(err: RankingError) -> Response {
    match err {
        RankingError::Storage(err) => storage_error(err),
    }
}

/// 成功响应
pub fn ok<T: serde::Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}
