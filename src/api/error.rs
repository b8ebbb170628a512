use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use thiserror::Error;

use crate::logic::{ValidationError, VehicleError};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload";

/// Body of every error response: `{"error": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Issues(Vec<ValidationError>),
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: ErrorDetail::Message(message.to_string()),
        }
    }

    pub fn issues(issues: Vec<ValidationError>) -> Self {
        Self {
            error: ErrorDetail::Issues(issues),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body bytes are not JSON
    #[error("Invalid JSON payload")]
    MalformedPayload,
    #[error(transparent)]
    Body(#[from] BytesRejection),
    #[error(transparent)]
    Path(#[from] PathRejection),
    #[error(transparent)]
    Vehicle(#[from] VehicleError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedPayload => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(INVALID_JSON_MESSAGE),
            ),
            ApiError::Body(rejection) => {
                (rejection.status(), ErrorResponse::new(&rejection.body_text()))
            }
            ApiError::Path(rejection) => {
                (rejection.status(), ErrorResponse::new(&rejection.body_text()))
            }
            ApiError::Vehicle(err) => vehicle_error_response(err),
        };

        (status, Json(body)).into_response()
    }
}

/// Response for a handler that panicked
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    log::error!("Request handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
        .into_response()
}

fn vehicle_error_response(err: VehicleError) -> (StatusCode, ErrorResponse) {
    match err {
        VehicleError::Validation(issues) => {
            log::debug!("Rejected vehicle payload with {} issue(s)", issues.len());
            (StatusCode::UNPROCESSABLE_ENTITY, ErrorResponse::issues(issues))
        }
        VehicleError::Conflict(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorResponse::new("VIN already exists"),
        ),
        VehicleError::NotFound(vin) => {
            log::debug!("Vehicle {} not found", vin);
            (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Vehicle not found"),
            )
        }
        VehicleError::VinAttemptsExhausted(_) | VehicleError::Store(_) => {
            log::error!("Vehicle request failed: {:#}", anyhow::Error::new(err));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal server error"),
            )
        }
    }
}
