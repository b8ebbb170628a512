use crate::model::Vehicle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The uniqueness constraint on `vin` rejected the write.
    #[error("vehicle with VIN '{0}' already exists")]
    DuplicateVin(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Durable collection of vehicles keyed by VIN.
///
/// Every lookup compares VINs case-insensitively. The store is the final
/// arbiter of uniqueness: `insert_vehicle` must check and write atomically.
#[async_trait::async_trait]
pub trait VehicleStore: Send + Sync {
    /// All vehicles in store order
    async fn list_vehicles(&self) -> StoreResult<Vec<Vehicle>>;
    async fn get_vehicle(&self, vin: &str) -> StoreResult<Option<Vehicle>>;
    /// Insert a new vehicle, failing with `DuplicateVin` on collision
    async fn insert_vehicle(&self, vehicle: Vehicle) -> StoreResult<Vehicle>;
    /// Replace every non-key field of the vehicle matching `vin`.
    /// Returns `None` when nothing matched.
    async fn update_vehicle(&self, vin: &str, vehicle: Vehicle) -> StoreResult<Option<Vehicle>>;
    /// Returns whether a vehicle was removed
    async fn delete_vehicle(&self, vin: &str) -> StoreResult<bool>;
}
