pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod store;

pub use api::routes;
pub use logic::{VehicleError, VehicleOperations};
pub use model::*;
pub use store::{MemoryStore, PostgresStore, VehicleStore};

use std::sync::Arc;

/// Wire vehicle operations over `store` into a ready-to-serve router
pub fn build_app<S: VehicleStore + 'static>(
    store: Arc<S>,
    config: &config::AppConfig,
) -> axum::Router {
    let ops = VehicleOperations::new(store, config.vehicles.vin_policy)
        .with_max_vin_attempts(config.vehicles.max_vin_attempts);

    api::routes::create_router().with_state(Arc::new(ops))
}

/// Connect to PostgreSQL, prepare the schema and serve until shutdown
pub async fn run_server(config: config::AppConfig) -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    let database_url = config.database_url();
    let postgres_store =
        store::PostgresStore::new(&database_url, config.database.max_connections).await?;

    postgres_store.migrate().await?;

    let app = build_app(Arc::new(postgres_store), &config);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!(
        "Vehicle registry listening on http://{} (VIN policy: {:?})",
        bind_address,
        config.vehicles.vin_policy
    );

    serve(listener, app).await?;

    Ok(())
}
