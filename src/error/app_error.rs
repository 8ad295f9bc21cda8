use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::{ErrorKind, StorageError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// HTTP status for each storage error kind.
pub fn storage_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(err) => storage_status(err.kind()),
            AppError::DatabaseError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::DatabaseError(ref e) => tracing::error!("Database error: {:?}", e),
            AppError::ConfigError(ref msg) => tracing::error!("Configuration error: {}", msg),
            AppError::BadRequest(_) | AppError::InvalidJson(_) | AppError::Storage(_) => {}
        }

        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_kinds_map_to_distinct_statuses() {
        assert_eq!(storage_status(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(storage_status(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(storage_status(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            storage_status(ErrorKind::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn bad_request_body_is_plain_text() {
        let err = AppError::BadRequest("id must be a number".to_string());
        assert_eq!(err.to_string(), "invalid request: id must be a number");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn storage_error_keeps_its_text() {
        let err: AppError =
            StorageError::not_found("storage.postgres.product.get_product_by_id", "product 9").into();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "storage.postgres.product.get_product_by_id: product 9 not found"
        );
    }
}
