use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::payload_extractor::{JsonPayload, VinPath};
use crate::logic::{validate_vehicle_body, VehicleError, VehicleOperations};
use crate::model::{Vehicle, VehicleBody};
use crate::store::traits::VehicleStore;

pub type AppState<S> = Arc<VehicleOperations<S>>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

fn parse_body(payload: &serde_json::Value) -> Result<VehicleBody, ApiError> {
    validate_vehicle_body(payload).map_err(|issues| VehicleError::Validation(issues).into())
}

pub async fn list_vehicles<S: VehicleStore>(
    State(ops): State<AppState<S>>,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    Ok(Json(ops.list().await?))
}

pub async fn create_vehicle<S: VehicleStore>(
    State(ops): State<AppState<S>>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<Vehicle>), ApiError> {
    let body = parse_body(&payload)?;
    let vehicle = ops.create(body).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn get_vehicle<S: VehicleStore>(
    State(ops): State<AppState<S>>,
    VinPath(vin): VinPath,
) -> Result<Json<Vehicle>, ApiError> {
    Ok(Json(ops.get(&vin).await?))
}

pub async fn update_vehicle<S: VehicleStore>(
    State(ops): State<AppState<S>>,
    VinPath(vin): VinPath,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<Vehicle>, ApiError> {
    let body = parse_body(&payload)?;
    Ok(Json(ops.update(&vin, body).await?))
}

pub async fn delete_vehicle<S: VehicleStore>(
    State(ops): State<AppState<S>>,
    VinPath(vin): VinPath,
) -> Result<StatusCode, ApiError> {
    ops.delete(&vin).await?;
    Ok(StatusCode::NO_CONTENT)
}
