//! Vehicle endpoints - entry, exit, listings and lookups

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use parkctl_core::{NewVehicle, VehicleRecord};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidPlate, ValidRecordId};
use crate::http::server::AppState;

/// Register entry request
#[derive(Deserialize)]
pub struct EntryRequest {
    pub plate: String,
    pub model: String,
    pub color: String,
}

/// Envelope for state-changing operations
#[derive(Serialize)]
pub struct ApiMessage<T> {
    pub message: String,
    pub data: T,
}

/// Search query params
#[derive(Deserialize)]
pub struct SearchParams {
    pub model: Option<String>,
    pub color: Option<String>,
}

/// POST /api/vehicles/entry - register a vehicle entering
async fn register_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EntryRequest>,
) -> Result<(StatusCode, Json<ApiMessage<VehicleRecord>>), ApiError> {
    let vehicle = NewVehicle::new(&req.plate, &req.model, &req.color)?;
    let record = state.service.register_entry(vehicle).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage {
            message: "entry registered".into(),
            data: record,
        }),
    ))
}

/// PUT /api/vehicles/exit/{id} - register exit and charge the fee
async fn register_exit(
    State(state): State<Arc<AppState>>,
    ValidRecordId(id): ValidRecordId,
) -> Result<Json<ApiMessage<VehicleRecord>>, ApiError> {
    let record = state.service.register_exit(id).await?;
    let due = record
        .fee_paid
        .map(|f| f.to_string())
        .unwrap_or_else(|| "0.00".into());

    Ok(Json(ApiMessage {
        message: format!("exit registered, amount due: {due}"),
        data: record,
    }))
}

/// GET /api/vehicles - every record, newest first
async fn list_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VehicleRecord>>, ApiError> {
    Ok(Json(state.service.list_all().await?))
}

/// GET /api/vehicles/active - parked vehicles
async fn list_active(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VehicleRecord>>, ApiError> {
    Ok(Json(state.service.list_active().await?))
}

/// GET /api/vehicles/plate/{plate}
async fn get_by_plate(
    State(state): State<Arc<AppState>>,
    ValidPlate(plate): ValidPlate,
) -> Result<Json<VehicleRecord>, ApiError> {
    let record = state
        .service
        .find_by_plate(plate.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "vehicle",
            id: plate.into_string(),
        })?;

    Ok(Json(record))
}

/// GET /api/vehicles/id/{id}
async fn get_by_id(
    State(state): State<Arc<AppState>>,
    ValidRecordId(id): ValidRecordId,
) -> Result<Json<VehicleRecord>, ApiError> {
    let record = state
        .service
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "record",
            id: id.to_string(),
        })?;

    Ok(Json(record))
}

/// GET /api/vehicles/search?model=&color=
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<VehicleRecord>>, ApiError> {
    let records = state
        .service
        .search(params.model.as_deref(), params.color.as_deref())
        .await?;
    Ok(Json(records))
}

/// Vehicle routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/vehicles", get(list_all))
        .route("/api/vehicles/entry", post(register_entry))
        .route("/api/vehicles/exit/{id}", put(register_exit))
        .route("/api/vehicles/active", get(list_active))
        .route("/api/vehicles/plate/{plate}", get(get_by_plate))
        .route("/api/vehicles/id/{id}", get(get_by_id))
        .route("/api/vehicles/search", get(search))
}
