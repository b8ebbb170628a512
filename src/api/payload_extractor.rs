use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde_json::Value;

use crate::api::error::ApiError;

/// Request body parsed as untyped JSON.
///
/// Only syntax is checked here, so unparsable bodies map to 400 while shape
/// problems are left to field validation. `Content-Type` is not required.
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            log::debug!("Unparsable request body: {}", e);
            ApiError::MalformedPayload
        })?;

        Ok(Self(value))
    }
}

/// The `{vin}` path segment. Rejections use the JSON error envelope.
#[derive(Debug, Clone)]
pub struct VinPath(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for VinPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(vin) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(vin))
    }
}
