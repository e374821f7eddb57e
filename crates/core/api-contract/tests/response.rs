use api_contract::{ApiResponse, OptionDto};

#[test]
fn api_response_success_has_no_error_message() {
    let response = ApiResponse::success(vec![OptionDto {
        key: "GroupRatio".to_string(),
        value: "{}".to_string(),
    }]);
    assert!(response.success);
    assert_eq!(response.data.as_ref().map(Vec::len), Some(1));
    assert!(response.error_message().is_none());
}

#[test]
fn api_response_error_exposes_message() {
    let response = ApiResponse::<()>::error("INVALID.REQUEST", "AutoGroups must be a string array");
    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(
        response.error_message().as_deref(),
        Some("AutoGroups must be a string array")
    );
}

#[test]
fn api_response_roundtrips_through_json() {
    let text = serde_json::to_string(&ApiResponse::<()>::error("AUTH.UNAUTHORIZED", "unauthorized"))
        .expect("serialize");
    let parsed: ApiResponse<()> = serde_json::from_str(&text).expect("parse");
    assert_eq!(parsed.error.map(|err| err.code), Some("AUTH.UNAUTHORIZED".to_string()));
}
