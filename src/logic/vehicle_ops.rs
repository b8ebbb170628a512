use std::sync::Arc;
use thiserror::Error;

use crate::logic::validate::{validate_client_vin, ValidationError};
use crate::model::{generate_vin, Vehicle, VehicleBody, VinPolicy};
use crate::store::traits::{StoreError, VehicleStore};

/// Default cap on generated-VIN insert attempts
pub const DEFAULT_MAX_VIN_ATTEMPTS: u32 = 32;

/// Produces candidate VINs for the `Generated` policy
pub type VinGenerator = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("invalid vehicle payload")]
    Validation(Vec<ValidationError>),
    #[error("VIN already exists")]
    Conflict(String),
    #[error("Vehicle not found")]
    NotFound(String),
    #[error("no unique VIN found after {0} attempts")]
    VinAttemptsExhausted(u32),
    #[error("store failure: {0}")]
    Store(#[source] anyhow::Error),
}

impl From<StoreError> for VehicleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateVin(vin) => VehicleError::Conflict(vin),
            StoreError::Backend(e) => VehicleError::Store(e),
        }
    }
}

impl From<ValidationError> for VehicleError {
    fn from(err: ValidationError) -> Self {
        VehicleError::Validation(vec![err])
    }
}

pub type VehicleResult<T> = std::result::Result<T, VehicleError>;

/// Lifecycle operations over the vehicle collection.
///
/// Holds the identity policy for the deployment. The existence check before a
/// client-supplied insert is advisory; a concurrent duplicate is still caught
/// by the store and reported as the same `Conflict`.
pub struct VehicleOperations<S> {
    store: Arc<S>,
    policy: VinPolicy,
    max_vin_attempts: u32,
    vin_generator: VinGenerator,
}

impl<S: VehicleStore> VehicleOperations<S> {
    pub fn new(store: Arc<S>, policy: VinPolicy) -> Self {
        Self {
            store,
            policy,
            max_vin_attempts: DEFAULT_MAX_VIN_ATTEMPTS,
            vin_generator: Arc::new(generate_vin),
        }
    }

    pub fn with_max_vin_attempts(mut self, attempts: u32) -> Self {
        self.max_vin_attempts = attempts.max(1);
        self
    }

    pub fn with_vin_generator(mut self, generator: VinGenerator) -> Self {
        self.vin_generator = generator;
        self
    }

    pub fn policy(&self) -> VinPolicy {
        self.policy
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn list(&self) -> VehicleResult<Vec<Vehicle>> {
        Ok(self.store.list_vehicles().await?)
    }

    pub async fn create(&self, body: VehicleBody) -> VehicleResult<Vehicle> {
        match self.policy {
            VinPolicy::ClientSupplied => self.create_with_client_vin(body).await,
            VinPolicy::Generated => self.create_with_generated_vin(body).await,
        }
    }

    async fn create_with_client_vin(&self, mut body: VehicleBody) -> VehicleResult<Vehicle> {
        let vin = validate_client_vin(body.vin.take())?;

        if self.store.get_vehicle(&vin).await?.is_some() {
            log::warn!("Rejected duplicate VIN {}", vin);
            return Err(VehicleError::Conflict(vin));
        }

        match self.store.insert_vehicle(body.into_vehicle(vin)).await {
            Ok(vehicle) => {
                log::info!("Created vehicle {}", vehicle.vin);
                Ok(vehicle)
            }
            Err(StoreError::DuplicateVin(vin)) => {
                log::warn!("Rejected duplicate VIN {} at insert", vin);
                Err(VehicleError::Conflict(vin))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_with_generated_vin(&self, body: VehicleBody) -> VehicleResult<Vehicle> {
        for attempt in 1..=self.max_vin_attempts {
            let vin = (self.vin_generator)();
            match self.store.insert_vehicle(body.clone().into_vehicle(vin)).await {
                Ok(vehicle) => {
                    log::info!("Created vehicle {}", vehicle.vin);
                    return Ok(vehicle);
                }
                Err(StoreError::DuplicateVin(vin)) => {
                    log::warn!("Generated VIN {} collided (attempt {})", vin, attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }

        log::error!(
            "Could not generate a unique VIN in {} attempts",
            self.max_vin_attempts
        );
        Err(VehicleError::VinAttemptsExhausted(self.max_vin_attempts))
    }

    pub async fn get(&self, vin: &str) -> VehicleResult<Vehicle> {
        self.store
            .get_vehicle(vin)
            .await?
            .ok_or_else(|| VehicleError::NotFound(vin.to_string()))
    }

    /// Replace every field but the VIN. Identity comes from `vin`, never the body.
    pub async fn update(&self, vin: &str, body: VehicleBody) -> VehicleResult<Vehicle> {
        let existing = self.get(vin).await?;

        // Deleted between the lookup and the write
        let updated = self
            .store
            .update_vehicle(vin, body.into_vehicle(existing.vin))
            .await?
            .ok_or_else(|| VehicleError::NotFound(vin.to_string()))?;

        log::info!("Updated vehicle {}", updated.vin);
        Ok(updated)
    }

    pub async fn delete(&self, vin: &str) -> VehicleResult<()> {
        let existing = self.get(vin).await?;

        if !self.store.delete_vehicle(vin).await? {
            return Err(VehicleError::NotFound(vin.to_string()));
        }

        log::info!("Deleted vehicle {}", existing.vin);
        Ok(())
    }
}
