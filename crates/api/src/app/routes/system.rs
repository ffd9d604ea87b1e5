use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(ctx): Extension<SessionContext>) -> impl IntoResponse {
    let session = ctx.session();
    Json(serde_json::json!({
        "uid": session.uid.as_str(),
        "email": session.email,
        "signed_in_at": session.signed_in_at.to_rfc3339(),
        "expires_at": session.expires_at.to_rfc3339(),
    }))
}
