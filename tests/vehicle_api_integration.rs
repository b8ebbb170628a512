use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::net::TcpListener;

use vehicle_registry::config::AppConfig;
use vehicle_registry::{build_app, MemoryStore, VinPolicy};

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    /// Serve the app over a memory store on an ephemeral port
    async fn spawn(policy: VinPolicy) -> Self {
        let mut config = AppConfig::default();
        config.vehicles.vin_policy = policy;
        let app = build_app(Arc::new(MemoryStore::new()), &config);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{}", addr),
        }
    }

    async fn post(&self, path: &str, json: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(json)
            .send()
            .await
            .expect("POST failed")
    }

    async fn post_raw(&self, path: &str, body: &'static str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("POST failed")
    }

    async fn put(&self, path: &str, json: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.base_url, path))
            .json(json)
            .send()
            .await
            .expect("PUT failed")
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET failed")
    }

    async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("DELETE failed")
    }
}

fn toyota() -> Value {
    json!({
        "manufacturer_name": "Toyota",
        "description": "Integration test vehicle",
        "horse_power": 180,
        "model_name": "Camry",
        "model_year": 2022,
        "purchase_price": 27000,
        "fuel_type": "Gas"
    })
}

#[tokio::test]
async fn test_client_supplied_vin_workflow() {
    let client = TestClient::spawn(VinPolicy::ClientSupplied).await;

    let created = client
        .post(
            "/vehicle",
            &json!({
                "manufacturer_name": "Honda",
                "description": "Test car",
                "horse_power": 150,
                "model_name": "Civic",
                "model_year": 2021,
                "purchase_price": 22000,
                "fuel_type": "Gas",
                "vin": "TESTVIN123"
            }),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["vin"], "TESTVIN123");

    let update = json!({
        "vin": "HIJACKED",
        "manufacturer_name": "Honda",
        "description": "Updated",
        "horse_power": 155,
        "model_name": "Civic",
        "model_year": 2022,
        "purchase_price": 20000,
        "fuel_type": "Gas"
    });
    let updated = client.put("/vehicle/testvin123", &update).await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["description"], "Updated");
    assert_eq!(updated["vin"], "TESTVIN123");

    let fetched: Value = client.get("/vehicle/TestVin123").await.json().await.unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(
        client.get("/vehicle/HIJACKED").await.status(),
        StatusCode::NOT_FOUND
    );

    assert_eq!(
        client.delete("/vehicle/TESTVIN123").await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        client.get("/vehicle/TESTVIN123").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client.delete("/vehicle/TESTVIN123").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_case_variants_conflict() {
    let client = TestClient::spawn(VinPolicy::ClientSupplied).await;

    let mut first = toyota();
    first["vin"] = json!("abc123");
    let mut second = toyota();
    second["vin"] = json!("ABC123");

    assert_eq!(client.post("/vehicle", &first).await.status(), StatusCode::CREATED);
    let response = client.post("/vehicle", &second).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let vehicles: Vec<Value> = client.get("/vehicle").await.json().await.unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0]["vin"], "abc123");
}

#[tokio::test]
async fn test_concurrent_duplicate_creates_yield_one_vehicle() {
    let client = Arc::new(TestClient::spawn(VinPolicy::ClientSupplied).await);

    let mut tasks = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let mut body = toyota();
            body["vin"] = json!(if i % 2 == 0 { "race42" } else { "RACE42" });
            client.post("/vehicle", &body).await.status()
        }));
    }

    let mut created = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::UNPROCESSABLE_ENTITY => {}
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_generated_vin_workflow() {
    let client = TestClient::spawn(VinPolicy::Generated).await;

    let response = client.post("/vehicle", &toyota()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let data: Value = response.json().await.unwrap();
    assert_eq!(data["manufacturer_name"], "Toyota");
    assert_eq!(data["horse_power"], 180);

    let vin = data["vin"].as_str().unwrap().to_string();
    assert_eq!(vin.len(), 18);
    assert!(vin.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));

    let path = format!("/vehicle/{}", vin);
    assert_eq!(client.delete(&path).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(client.get(&path).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generated_vins_are_distinct() {
    let client = TestClient::spawn(VinPolicy::Generated).await;

    let mut vins = HashSet::new();
    for _ in 0..1000 {
        let data: Value = client.post("/vehicle", &toyota()).await.json().await.unwrap();
        vins.insert(data["vin"].as_str().unwrap().to_string());
    }
    assert_eq!(vins.len(), 1000);
}

#[tokio::test]
async fn test_invalid_payloads() {
    let client = TestClient::spawn(VinPolicy::Generated).await;

    let mut bad_type = toyota();
    bad_type["manufacturer_name"] = json!(122334);
    let response = client.post("/vehicle", &bad_type).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_array());

    let response = client.post_raw("/vehicle", "{vin:123}").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let text = response.text().await.unwrap();
    assert!(text.contains("Invalid JSON"));

    let vehicles: Vec<Value> = client.get("/vehicle").await.json().await.unwrap();
    assert!(vehicles.is_empty());
}
