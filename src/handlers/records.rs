//! CRUD endpoints shared by every store entity.
//!
//! Mounted once per resource with [`record_routes`]:
//!
//! | Method | Path           | Operation                |
//! |--------|----------------|--------------------------|
//! | GET    | `/`            | list live records        |
//! | POST   | `/`            | create (201)             |
//! | DELETE | `/?ids=1&ids=2`| bulk soft delete         |
//! | GET    | `/:id`         | fetch one                |
//! | PUT    | `/:id`         | overwrite                |
//! | DELETE | `/:id`         | soft delete              |

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::Response,
    routing::get,
    Json, Router,
};
use sea_orm::IntoActiveModel;
use serde::Serialize;
use tracing::info;

use super::common::{
    created_response, json_body, message_response, path_id, query_ids, success_response,
};
use crate::{entities::StoreEntity, errors::ApiError, AppState};

pub async fn list_records<E>(State(state): State<AppState>) -> Result<Response, ApiError>
where
    E: StoreEntity,
    E::Model: Serialize,
{
    let records = state.services.records::<E>().get_all().await?;
    Ok(success_response(records))
}

pub async fn get_record<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    E: StoreEntity,
    E::Model: Serialize,
{
    let record = state.services.records::<E>().get_by_id(path_id(&id)).await?;
    Ok(success_response(record))
}

pub async fn create_record<E>(
    State(state): State<AppState>,
    payload: Result<Json<E::Input>, JsonRejection>,
) -> Result<Response, ApiError>
where
    E: StoreEntity,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
{
    let input = json_body(payload)?;
    let record = state.services.records::<E>().create(input).await?;
    Ok(created_response(record))
}

pub async fn update_record<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<E::Input>, JsonRejection>,
) -> Result<Response, ApiError>
where
    E: StoreEntity,
    E::Model: Serialize,
    E::ActiveModel: Send,
{
    let input = json_body(payload)?;
    let record = state
        .services
        .records::<E>()
        .update(path_id(&id), input)
        .await?;
    Ok(success_response(record))
}

pub async fn delete_record<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    E: StoreEntity,
{
    state.services.records::<E>().delete(path_id(&id)).await?;
    Ok(message_response(format!("{} deleted successfully", E::NAME)))
}

pub async fn delete_records<E>(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError>
where
    E: StoreEntity,
{
    let ids = query_ids(&params);
    let deleted = state.services.records::<E>().delete_all(&ids).await?;
    info!(deleted, "bulk delete of {}", E::PLURAL);
    Ok(message_response(format!(
        "{} {} deleted successfully",
        deleted,
        E::PLURAL
    )))
}

/// Router with the shared CRUD endpoints for `E`.
pub fn record_routes<E>() -> Router<AppState>
where
    E: StoreEntity,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
{
    Router::new()
        .route(
            "/",
            get(list_records::<E>)
                .post(create_record::<E>)
                .delete(delete_records::<E>),
        )
        .route(
            "/:id",
            get(get_record::<E>)
                .put(update_record::<E>)
                .delete(delete_record::<E>),
        )
}
