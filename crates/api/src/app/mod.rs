//! Router assembly.
//!
//! Handlers live in `routes/`, one file per area. They get the backend via
//! `Extension<Arc<AppServices>>` and map failures through `errors`.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// The complete router, as served by `main.rs` and the black-box tests.
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    // Everything below needs a session from /auth/signup or /auth/signin.
    let protected = routes::router()
        .layer(axum::middleware::from_fn_with_state(
            services.clone(),
            middleware::session_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/signup", post(routes::auth::sign_up))
        .route("/auth/signin", post(routes::auth::sign_in))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
