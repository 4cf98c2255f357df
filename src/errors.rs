use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Conflict")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error was produced
    pub timestamp: String,
}

/// Failure kinds surfaced by the data layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Still referenced: {0}")]
    StillReferenced(String),
}

impl ServiceError {
    pub fn not_found(resource: &str, id: i32) -> Self {
        ServiceError::NotFound(format!("{} with id {} not found", resource, id))
    }

    /// True when the underlying storage rejected a write for a unique index.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        )
    }

    /// True when the underlying storage rejected a write for a foreign key.
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(err) if matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
        )
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::StillReferenced(_) => StatusCode::CONFLICT,
            Self::DatabaseError(_) if self.is_unique_violation() => StatusCode::CONFLICT,
            Self::DatabaseError(_) if self.is_foreign_key_violation() => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Storage errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) if self.is_unique_violation() => {
                "Record conflicts with an existing record".to_string()
            }
            Self::DatabaseError(_) if self.is_foreign_key_violation() => {
                "Referenced record does not exist".to_string()
            }
            Self::DatabaseError(_) => "Database error".to_string(),
            _ => self.to_string(),
        }
    }
}

fn error_body(status: StatusCode, message: String, details: Option<String>) -> Response {
    let err = ErrorResponse {
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        message,
        details,
        request_id: current_request_id(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (status, Json(err)).into_response()
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        error_body(status, self.response_message(), None)
    }
}

/// API Error type for HTTP responses
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Service error: {0}")]
    ServiceError(#[from] ServiceError),

    /// The JSON extractor refused the body. Keeps the extractor's status
    /// (400 syntax, 415 content type, 422 shape).
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ServiceError(service_error) => service_error.into_response(),
            ApiError::InvalidBody(rejection) => error_body(
                rejection.status(),
                "Malformed request body".to_string(),
                Some(rejection.body_text()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn service_error_response_includes_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::not_found("Customer", 7).into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.request_id.as_deref(), Some("req-123"));
        assert_eq!(payload.message, "Not found: Customer with id 7 not found");
    }

    #[test]
    fn service_error_status_code_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::InvalidReference("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServiceError::StillReferenced("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_hide_details() {
        let err = ServiceError::DatabaseError(DbErr::Custom("password=hunter2".into()));
        assert_eq!(err.response_message(), "Database error");
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
    }

    #[tokio::test]
    async fn invalid_body_keeps_the_extractor_status() {
        let rejection = JsonRejection::MissingJsonContentType(Default::default());
        let response = ApiError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.error, "Unsupported Media Type");
        assert_eq!(payload.message, "Malformed request body");
        assert!(payload.details.is_some());
    }
}
