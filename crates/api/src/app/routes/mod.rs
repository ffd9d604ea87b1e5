use axum::{
    routing::{get, post},
    Router,
};

pub mod auth;
pub mod items;
pub mod system;

/// Router for all endpoints that need a signed-in session.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/auth/signout", post(auth::sign_out))
        .route("/items", get(items::list_items))
        .route("/items/add", post(items::add_item))
        .route("/items/remove", post(items::remove_item))
}
