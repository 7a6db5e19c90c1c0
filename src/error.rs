//! Error handling module
//!
//! Every failure leaves the service as `{"error": "..."}`. Storage failures
//! keep the raw driver message so callers see exactly what PostgreSQL said.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Message returned for any missing user row
pub const USER_NOT_FOUND: &str = "user not found";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", database_message(.0))]
    Database(#[from] tokio_postgres::Error),

    #[error("{0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("{0}")]
    NotFound(String),

    /// Request rejected by an extractor before any SQL ran
    #[error("{0}")]
    BadRequest(String),
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Database(e) => error!("Database error: {:?}", e),
            AppError::Pool(e) => error!("Pool error: {:?}", e),
            AppError::NotFound(_) | AppError::BadRequest(_) => {}
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Server-reported errors carry just the PostgreSQL message; client-side
/// failures (closed connection, bad conversion) use the driver's own text.
fn database_message(err: &tokio_postgres::Error) -> String {
    match err.as_db_error() {
        Some(db) => db.message().to_string(),
        None => err.to_string(),
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create the not found error for users
pub fn user_not_found() -> AppError {
    AppError::NotFound(USER_NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use deadpool_postgres::PoolError;
    use serde_json::{json, Value};

    fn client_side_error() -> tokio_postgres::Error {
        match "postgres://app@localhost:notaport/db".parse::<tokio_postgres::Config>() {
            Ok(_) => panic!("port should not parse"),
            Err(e) => e,
        }
    }

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(user_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("bad id".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Pool(PoolError::Closed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database(client_side_error()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_side_database_error_keeps_driver_text() {
        let err = client_side_error();
        assert!(err.as_db_error().is_none());
        let expected = err.to_string();

        assert_eq!(database_message(&err), expected);
        assert_eq!(AppError::Database(err).to_string(), expected);
    }

    #[tokio::test]
    async fn test_database_error_body_is_raw_message() {
        let err = client_side_error();
        let expected = err.to_string();

        let (status, body) = body_of(AppError::Database(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": expected }));
    }

    #[tokio::test]
    async fn test_pool_error_body_is_raw_message() {
        let (status, body) = body_of(AppError::Pool(PoolError::Closed)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": PoolError::Closed.to_string() }));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_of(user_not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": USER_NOT_FOUND }));
    }
}
