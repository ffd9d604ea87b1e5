use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pantry_auth::AuthError;
use pantry_infra::StoreError;

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::PasswordMismatch => {
            json_error(StatusCode::BAD_REQUEST, "password_mismatch", err.to_string())
        }
        AuthError::Provider(e) => json_error(StatusCode::BAD_REQUEST, "provider_error", e.message()),
        AuthError::SessionNotFound => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", err.to_string())
        }
        AuthError::SessionStore(_) => {
            tracing::error!(error = %err, "session registry failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "session_store_error", err.to_string())
        }
    }
}

/// Unreadable request body (bad JSON, wrong content type, missing field).
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_body", rejection.body_text())
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::warn!(error = %err, "document store request failed");
    match err {
        StoreError::Http(e) => json_error(StatusCode::BAD_GATEWAY, "transport_error", e.to_string()),
        StoreError::Backend { message, .. } => {
            json_error(StatusCode::BAD_GATEWAY, "backend_error", message)
        }
        StoreError::Decode { .. } => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "decode_error", err.to_string())
        }
        StoreError::InvalidConfig(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "config_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
