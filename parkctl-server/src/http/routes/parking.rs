//! Facility occupancy endpoint
//!
//! GET /api/parking/info - capacity, parked count, free slots

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use parkctl_core::ParkingInfo;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /api/parking/info
async fn parking_info(State(state): State<Arc<AppState>>) -> Result<Json<ParkingInfo>, ApiError> {
    Ok(Json(state.service.info().await?))
}

/// Parking routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/parking/info", get(parking_info))
}
