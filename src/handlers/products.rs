use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};

use super::common::{path_id, success_response};
use super::records::record_routes;
use crate::{entities::product, errors::ApiError, AppState};

pub fn product_routes() -> Router<AppState> {
    record_routes::<product::Entity>().route("/:id/suppliers", get(get_product_with_suppliers))
}

async fn get_product_with_suppliers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product = state
        .services
        .products()
        .get_product_with_suppliers(path_id(&id))
        .await?;
    Ok(success_response(product))
}
