use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};

use super::common::{path_id, success_response};
use super::records::record_routes;
use crate::{entities::supplier, errors::ApiError, AppState};

pub fn supplier_routes() -> Router<AppState> {
    record_routes::<supplier::Entity>()
        .route("/:id/products", get(get_supplier_with_products))
        .route("/:id/contact", get(get_supplier_with_contact))
        .route("/:id/contacts", get(list_supplier_contacts))
}

async fn get_supplier_with_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let supplier = state
        .services
        .suppliers()
        .get_supplier_with_products(path_id(&id))
        .await?;
    Ok(success_response(supplier))
}

async fn get_supplier_with_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let supplier = state
        .services
        .suppliers()
        .get_supplier_with_contact(path_id(&id))
        .await?;
    Ok(success_response(supplier))
}

async fn list_supplier_contacts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let contacts = state
        .services
        .contacts()
        .get_all_by_supplier_id(path_id(&id))
        .await?;
    Ok(success_response(contacts))
}
