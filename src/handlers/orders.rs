use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};

use super::common::{path_id, success_response};
use super::records::record_routes;
use crate::{entities::order, errors::ApiError, AppState};

pub fn order_routes() -> Router<AppState> {
    record_routes::<order::Entity>()
        .route("/:id/order-products", get(get_order_with_order_products))
}

async fn get_order_with_order_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let order = state
        .services
        .orders()
        .get_order_with_order_products(path_id(&id))
        .await?;
    Ok(success_response(order))
}
