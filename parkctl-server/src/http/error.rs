//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses `{error, message}` with
//! appropriate status codes. Store failures never leak their details.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use parkctl_core::{ParkingError, ValidationError};

use crate::db::repos::DbError;
use crate::service::ServiceError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Domain rejection (400 / 404 / 409)
    Parking(ParkingError),

    /// Resource not found by a lookup (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Parking(e) => match e {
                ParkingError::Validation(_) => StatusCode::BAD_REQUEST,
                ParkingError::NotFound { .. } => StatusCode::NOT_FOUND,
                ParkingError::CapacityExceeded { .. }
                | ParkingError::DuplicatePlate { .. }
                | ParkingError::AlreadyExited { .. } => StatusCode::CONFLICT,
            },
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Parking(e) => json!({
                "error": e.code(),
                "message": e.to_string()
            }),
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ParkingError> for ApiError {
    fn from(e: ParkingError) -> Self {
        Self::Parking(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Parking(e.into())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Parking(e) => Self::Parking(e),
            ServiceError::Database(e) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::from(ValidationError::Empty { field: "plate" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "plate cannot be empty");
    }

    #[tokio::test]
    async fn record_not_found_is_404() {
        let err = ApiError::from(ParkingError::NotFound { id: 9 });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lookup_not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "vehicle",
            id: "ABC1234".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], "vehicle 'ABC1234' not found");
    }

    #[tokio::test]
    async fn state_conflicts_are_409() {
        for err in [
            ParkingError::CapacityExceeded { capacity: 10 },
            ParkingError::duplicate_plate("ABC1234"),
            ParkingError::AlreadyExited { id: 1 },
        ] {
            let code = err.code();
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::CONFLICT);
            assert_eq!(body_json(response).await["error"], code);
        }
    }

    #[tokio::test]
    async fn database_error_is_generic_500() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::RowNotFound));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "an internal error occurred");
    }
}
