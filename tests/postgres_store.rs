//! Runs against a real PostgreSQL only when TEST_DATABASE_URL is set.

use vehicle_registry::store::{PostgresStore, StoreError, VehicleStore};
use vehicle_registry::{generate_vin, Vehicle};

async fn connect() -> Option<PostgresStore> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let store = PostgresStore::new(&url, 2)
        .await
        .expect("Failed to connect to TEST_DATABASE_URL");
    store.migrate().await.expect("Failed to migrate");
    Some(store)
}

fn vehicle(vin: &str) -> Vehicle {
    Vehicle {
        vin: vin.to_string(),
        manufacturer_name: "Honda".to_string(),
        description: "Postgres test car".to_string(),
        horse_power: 150,
        model_name: "Civic".to_string(),
        model_year: 2021,
        purchase_price: 22000.5,
        fuel_type: "Gas".to_string(),
    }
}

#[tokio::test]
async fn test_postgres_vehicle_lifecycle() {
    let Some(store) = connect().await else {
        println!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    // Unique per run so reruns against the same database do not collide
    let vin = format!("pg{}", generate_vin().to_lowercase());

    let inserted = store.insert_vehicle(vehicle(&vin)).await.unwrap();
    assert_eq!(inserted, vehicle(&vin));

    let duplicate = store.insert_vehicle(vehicle(&vin.to_uppercase())).await;
    assert!(matches!(duplicate, Err(StoreError::DuplicateVin(_))));

    let fetched = store.get_vehicle(&vin.to_uppercase()).await.unwrap().unwrap();
    assert_eq!(fetched.vin, vin);

    let mut replacement = vehicle("ignored");
    replacement.description = "Updated".to_string();
    let updated = store
        .update_vehicle(&vin.to_uppercase(), replacement)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.vin, vin);
    assert_eq!(updated.description, "Updated");

    assert!(store
        .list_vehicles()
        .await
        .unwrap()
        .iter()
        .any(|v| v.vin == vin));

    assert!(store.delete_vehicle(&vin.to_uppercase()).await.unwrap());
    assert!(!store.delete_vehicle(&vin).await.unwrap());
    assert!(store.get_vehicle(&vin).await.unwrap().is_none());
}
