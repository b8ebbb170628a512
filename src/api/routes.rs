use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::error::panic_response;
use crate::api::handlers::AppState;
use crate::api::{docs, handlers};
use crate::store::traits::VehicleStore;

pub fn create_router<S: VehicleStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // API Documentation
        .route("/docs", get(docs::get_api_docs))
        .route("/docs/openapi.json", get(docs::get_openapi_spec::<S>))
        // Vehicles
        .route(
            "/vehicle",
            get(handlers::list_vehicles::<S>).post(handlers::create_vehicle::<S>),
        )
        .route(
            "/vehicle/:vin",
            get(handlers::get_vehicle::<S>)
                .put(handlers::update_vehicle::<S>)
                .delete(handlers::delete_vehicle::<S>),
        )
        .layer(CatchPanicLayer::custom(panic_response))
}
