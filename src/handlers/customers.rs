use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};

use super::common::{path_id, success_response};
use super::records::record_routes;
use crate::{entities::customer, errors::ApiError, AppState};

/// Customer endpoints, including the order and contact views.
pub fn customer_routes() -> Router<AppState> {
    record_routes::<customer::Entity>()
        .route("/:id/orders", get(get_customer_with_orders))
        .route("/:id/contact", get(get_customer_with_contact))
        .route("/:id/contacts", get(list_customer_contacts))
}

async fn get_customer_with_orders(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let customer = state
        .services
        .customers()
        .get_customer_with_orders(path_id(&id))
        .await?;
    Ok(success_response(customer))
}

async fn get_customer_with_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let customer = state
        .services
        .customers()
        .get_customer_with_contact(path_id(&id))
        .await?;
    Ok(success_response(customer))
}

async fn list_customer_contacts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let contacts = state
        .services
        .contacts()
        .get_all_by_customer_id(path_id(&id))
        .await?;
    Ok(success_response(contacts))
}
