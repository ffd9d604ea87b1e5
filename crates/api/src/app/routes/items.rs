use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use pantry_infra::{Ignored, MutationOutcome};
use pantry_inventory::SearchFilter;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Query(query): Query<dto::ListQuery>,
) -> axum::response::Response {
    let items = match services.inventory(ctx.session()).list_items().await {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    let filter = SearchFilter::new(query.q.as_deref().unwrap_or_default());
    let visible = filter.apply(&items);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "count": visible.len(),
            "items": dto::items_to_json(&visible),
        })),
    )
        .into_response()
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    payload: Result<Json<dto::ItemQuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let inventory = services.inventory(ctx.session());
    match inventory.add_item(&body.name, body.quantity).await {
        Ok(outcome) => outcome_response(&services, &ctx, outcome).await,
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    payload: Result<Json<dto::ItemQuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let inventory = services.inventory(ctx.session());
    match inventory.remove_item(&body.name, body.quantity).await {
        Ok(outcome) => outcome_response(&services, &ctx, outcome).await,
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Ignored requests are not errors; the response still shows the current list.
async fn outcome_response(
    services: &AppServices,
    ctx: &SessionContext,
    outcome: MutationOutcome,
) -> axum::response::Response {
    let (items, reason) = match outcome {
        MutationOutcome::Applied(items) => (items, None),
        MutationOutcome::Ignored(ignored) => {
            let reason = match ignored {
                Ignored::Invalid(e) => e.to_string(),
                Ignored::Missing(key) => format!("'{key}' is not in the pantry"),
            };
            match services.inventory(ctx.session()).list_items().await {
                Ok(items) => (items, Some(reason)),
                Err(e) => return errors::store_error_to_response(e),
            }
        }
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "applied": reason.is_none(),
            "reason": reason,
            "items": dto::items_to_json(&items),
        })),
    )
        .into_response()
}
