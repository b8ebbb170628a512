use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::model::{canonical_vin, Vehicle};
use crate::store::traits::{StoreError, StoreResult, VehicleStore};

/// In-process store keyed by canonical VIN. Listing order is the key order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    vehicles: RwLock<BTreeMap<String, Vehicle>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vehicles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.read().is_empty()
    }
}

#[async_trait::async_trait]
impl VehicleStore for MemoryStore {
    async fn list_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        Ok(self.vehicles.read().values().cloned().collect())
    }

    async fn get_vehicle(&self, vin: &str) -> StoreResult<Option<Vehicle>> {
        Ok(self.vehicles.read().get(&canonical_vin(vin)).cloned())
    }

    async fn insert_vehicle(&self, vehicle: Vehicle) -> StoreResult<Vehicle> {
        let mut vehicles = self.vehicles.write();
        let key = canonical_vin(&vehicle.vin);
        if vehicles.contains_key(&key) {
            return Err(StoreError::DuplicateVin(vehicle.vin));
        }
        vehicles.insert(key, vehicle.clone());
        Ok(vehicle)
    }

    async fn update_vehicle(&self, vin: &str, vehicle: Vehicle) -> StoreResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write();
        let Some(existing) = vehicles.get_mut(&canonical_vin(vin)) else {
            return Ok(None);
        };

        // The stored VIN spelling is kept
        *existing = Vehicle {
            vin: existing.vin.clone(),
            ..vehicle
        };
        Ok(Some(existing.clone()))
    }

    async fn delete_vehicle(&self, vin: &str) -> StoreResult<bool> {
        Ok(self.vehicles.write().remove(&canonical_vin(vin)).is_some())
    }
}
