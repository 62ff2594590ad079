//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use parkctl_core::{Plate, RecordId, ValidationError};

use super::error::ApiError;

/// Extract and normalize a plate from path
pub struct ValidPlate(pub Plate);

impl<S> FromRequestParts<S> for ValidPlate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(plate): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::from(ValidationError::Empty { field: "plate" }))?;

        Ok(Self(Plate::new(&plate)?))
    }
}

/// Extract a record identity from path
pub struct ValidRecordId(pub RecordId);

impl<S> FromRequestParts<S> for ValidRecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::from(ValidationError::Empty { field: "id" }))?;

        let id = id
            .parse::<RecordId>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                ApiError::from(ValidationError::InvalidFormat {
                    field: "id",
                    reason: "must be a positive integer",
                })
            })?;

        Ok(Self(id))
    }
}
