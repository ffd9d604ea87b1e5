use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use pantry_auth::{Credentials, SignUp};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

pub async fn sign_up(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<SignUp>, JsonRejection>,
) -> axum::response::Response {
    let Json(form) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    match services.backend().auth().sign_up(&form).await {
        Ok(session) => (StatusCode::CREATED, Json(dto::session_to_json(&session))).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

pub async fn sign_in(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> axum::response::Response {
    let Json(credentials) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    match services.backend().auth().sign_in(&credentials).await {
        Ok(session) => (StatusCode::OK, Json(dto::session_to_json(&session))).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

pub async fn sign_out(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    match services.backend().auth().sign_out(ctx.token()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}
