use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::ids::{string_to_id, strings_to_ids};

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Body returned by delete endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

pub fn message_response(message: impl Into<String>) -> Response {
    success_response(MessageResponse {
        message: message.into(),
    })
}

/// Unwraps a JSON body, turning extractor rejections into `ApiError::InvalidBody`.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(ApiError::from)
}

/// Coerces a path segment into a store id.
pub fn path_id(raw: &str) -> i32 {
    string_to_id(raw)
}

/// Collects every `ids` value from a query string such as `?ids=1&ids=2`.
pub fn query_ids(params: &[(String, String)]) -> Vec<i32> {
    let raw: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "ids")
        .map(|(_, value)| value.as_str())
        .collect();
    strings_to_ids(&raw)
}
