use super::*;

#[test]
fn maps_authorization_statuses() {
    assert_eq!(ErrorCode::from_http_status(401), ErrorCode::Unauthorized);
    assert!(ErrorCode::from_http_status(403).is_authorization());
    assert!(!ErrorCode::from_http_status(500).is_authorization());
}

#[test]
fn keeps_server_message_from_json_body() {
    let err = ApiError::from_response(422, r#"{"erro":"CNPJ inválido"}"#);
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.message, "CNPJ inválido");
}

#[test]
fn falls_back_to_plain_text_or_status() {
    let err = ApiError::from_response(500, "  boom \n");
    assert_eq!(err.code, ErrorCode::Internal);
    assert_eq!(err.message, "boom");

    let empty = ApiError::from_response(404, "");
    assert_eq!(empty.code, ErrorCode::NotFound);
    assert_eq!(empty.message, "HTTP 404");
}
