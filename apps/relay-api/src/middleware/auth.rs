//! 请求上下文与管理令牌校验
//!
//! - request_context：注入 request_id/trace_id
//! - bearer_token：从 Authorization 头提取 Bearer token
//! - is_admin / require_admin：比对静态管理令牌

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use domain::Viewer;
use relay_telemetry::new_request_ids;
use subtle::ConstantTimeEq;
use tracing::{Instrument, info_span};

use crate::AppState;
use crate::utils::response::auth_error;

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    for (name, value) in [("x-request-id", &ids.request_id), ("x-trace-id", &ids.trace_id)] {
        response.headers_mut().insert(
            name,
            HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
    }
    response
}

/// 从请求头中提取 Bearer token
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(header::AUTHORIZATION)?;
    let auth_str = header_value.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

/// 请求是否携带正确的管理令牌（常量时间比较）。
pub fn is_admin(state: &AppState, headers: &HeaderMap) -> bool {
    match bearer_token(headers) {
        Some(token) => bool::from(token.as_bytes().ct_eq(state.admin_token.as_bytes())),
        None => false,
    }
}

pub fn viewer(state: &AppState, headers: &HeaderMap) -> Viewer {
    if is_admin(state, headers) {
        Viewer::Admin
    } else {
        Viewer::Public
    }
}

pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    if is_admin(state, headers) {
        Ok(())
    } else {
        Err(auth_error(StatusCode::UNAUTHORIZED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_headers, state_with_options};

    #[test]
    fn bearer_token_extracts() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer token-1"),
        );
        assert_eq!(bearer_token(&headers), Some("token-1"));
    }

    #[test]
    fn wrong_or_missing_token_is_public() {
        let state = state_with_options(&[]);
        let mut headers = HeaderMap::new();
        assert_eq!(viewer(&state, &headers), Viewer::Public);
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer nope"));
        assert_eq!(viewer(&state, &headers), Viewer::Public);
        assert_eq!(viewer(&state, &admin_headers()), Viewer::Admin);
    }
}
