use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::model::Vehicle;
use crate::store::traits::{StoreError, StoreResult, VehicleStore};

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

const VEHICLE_COLUMNS: &str =
    "vin, manufacturer_name, description, horse_power, model_name, model_year, purchase_price, fuel_type";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the vehicles table and its case-insensitive VIN index if absent
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                vin TEXT PRIMARY KEY,
                manufacturer_name TEXT NOT NULL,
                description TEXT NOT NULL,
                horse_power INTEGER NOT NULL,
                model_name TEXT NOT NULL,
                model_year INTEGER NOT NULL,
                purchase_price DOUBLE PRECISION NOT NULL,
                fuel_type TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create vehicles table")?;

        sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS vehicles_vin_lower_idx ON vehicles (LOWER(vin))")
            .execute(&self.pool)
            .await
            .context("Failed to create vehicles VIN index")?;

        log::info!("vehicles table ready");
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait::async_trait]
impl VehicleStore for PostgresStore {
    async fn list_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!("SELECT {VEHICLE_COLUMNS} FROM vehicles"))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list vehicles")?;

        Ok(vehicles)
    }

    async fn get_vehicle(&self, vin: &str) -> StoreResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE LOWER(vin) = LOWER($1)"
        ))
        .bind(vin)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch vehicle")?;

        Ok(vehicle)
    }

    async fn insert_vehicle(&self, vehicle: Vehicle) -> StoreResult<Vehicle> {
        let result = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles ({VEHICLE_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(&vehicle.vin)
        .bind(&vehicle.manufacturer_name)
        .bind(&vehicle.description)
        .bind(vehicle.horse_power)
        .bind(&vehicle.model_name)
        .bind(vehicle.model_year)
        .bind(vehicle.purchase_price)
        .bind(&vehicle.fuel_type)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(inserted) => Ok(inserted),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateVin(vehicle.vin)),
            Err(e) => Err(anyhow::Error::new(e)
                .context("Failed to insert vehicle")
                .into()),
        }
    }

    async fn update_vehicle(&self, vin: &str, vehicle: Vehicle) -> StoreResult<Option<Vehicle>> {
        let updated = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles SET
                manufacturer_name = $2,
                description = $3,
                horse_power = $4,
                model_name = $5,
                model_year = $6,
                purchase_price = $7,
                fuel_type = $8
            WHERE LOWER(vin) = LOWER($1)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(vin)
        .bind(&vehicle.manufacturer_name)
        .bind(&vehicle.description)
        .bind(vehicle.horse_power)
        .bind(&vehicle.model_name)
        .bind(vehicle.model_year)
        .bind(vehicle.purchase_price)
        .bind(&vehicle.fuel_type)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update vehicle")?;

        Ok(updated)
    }

    async fn delete_vehicle(&self, vin: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE LOWER(vin) = LOWER($1)")
            .bind(vin)
            .execute(&self.pool)
            .await
            .context("Failed to delete vehicle")?;

        Ok(result.rows_affected() > 0)
    }
}
