use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of hex digits taken from a v4 UUID when the server assigns a VIN
pub const GENERATED_VIN_LEN: usize = 18;

/// A stored vehicle record. `vin` keeps the spelling it was created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    pub vin: String,
    pub manufacturer_name: String,
    pub description: String,
    pub horse_power: i32,
    pub model_name: String,
    pub model_year: i32,
    pub purchase_price: f64,
    pub fuel_type: String,
}

/// Create/update request body after shape validation.
///
/// `vin` is optional here; whether it is required, ignored or generated is
/// decided by the active `VinPolicy`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VehicleBody {
    #[serde(default)]
    pub vin: Option<String>,
    pub manufacturer_name: String,
    pub description: String,
    pub horse_power: i32,
    pub model_name: String,
    pub model_year: i32,
    pub purchase_price: f64,
    pub fuel_type: String,
}

impl VehicleBody {
    pub fn into_vehicle(self, vin: String) -> Vehicle {
        Vehicle {
            vin,
            manufacturer_name: self.manufacturer_name,
            description: self.description,
            horse_power: self.horse_power,
            model_name: self.model_name,
            model_year: self.model_year,
            purchase_price: self.purchase_price,
            fuel_type: self.fuel_type,
        }
    }
}

/// How a deployment assigns VINs on create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VinPolicy {
    /// The client sends the VIN; duplicates are rejected.
    #[default]
    ClientSupplied,
    /// The server generates the VIN and retries on collision.
    Generated,
}

/// Random 18-character uppercase hex VIN
pub fn generate_vin() -> String {
    let mut vin = Uuid::new_v4().simple().to_string();
    vin.truncate(GENERATED_VIN_LEN);
    vin.make_ascii_uppercase();
    vin
}

/// Key under which VINs are compared. Two VINs name the same vehicle when
/// their canonical forms are equal.
pub fn canonical_vin(vin: &str) -> String {
    vin.to_lowercase()
}
