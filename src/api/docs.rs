use axum::{
    extract::State,
    response::{Html, Json},
};
use serde_json::{json, Value};

use crate::api::handlers::AppState;
use crate::model::VinPolicy;
use crate::store::traits::VehicleStore;

pub async fn get_api_docs() -> Html<&'static str> {
    Html(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Vehicle Registry API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            SwaggerUIBundle({
                url: '/docs/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#,
    )
}

pub async fn get_openapi_spec<S: VehicleStore>(State(ops): State<AppState<S>>) -> Json<Value> {
    Json(openapi_spec(ops.policy()))
}

fn vehicle_body_schema(policy: VinPolicy) -> Value {
    let mut required = vec![
        "manufacturer_name",
        "description",
        "horse_power",
        "model_name",
        "model_year",
        "purchase_price",
        "fuel_type",
    ];
    let mut properties = json!({
        "manufacturer_name": { "type": "string" },
        "description": { "type": "string" },
        "horse_power": { "type": "integer", "format": "int32" },
        "model_name": { "type": "string" },
        "model_year": { "type": "integer", "format": "int32" },
        "purchase_price": { "type": "number", "format": "double" },
        "fuel_type": { "type": "string" }
    });

    if policy == VinPolicy::ClientSupplied {
        required.insert(0, "vin");
        properties["vin"] = json!({ "type": "string" });
    }

    json!({ "type": "object", "required": required, "properties": properties })
}

/// OpenAPI document for the vehicle routes under the active VIN policy
pub fn openapi_spec(policy: VinPolicy) -> Value {
    let error = json!({
        "description": "Error",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
    });
    let vehicle = json!({ "$ref": "#/components/schemas/Vehicle" });
    let vin_param = json!([{ "name": "vin", "in": "path", "required": true, "schema": { "type": "string" } }]);
    let body = json!({
        "required": true,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/VehicleBody" } } }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Vehicle Registry API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/vehicle": {
                "get": {
                    "summary": "List all vehicles",
                    "responses": {
                        "200": {
                            "description": "All vehicles",
                            "content": { "application/json": { "schema": { "type": "array", "items": vehicle } } }
                        }
                    }
                },
                "post": {
                    "summary": "Create a vehicle",
                    "requestBody": body,
                    "responses": {
                        "201": { "description": "Created", "content": { "application/json": { "schema": vehicle } } },
                        "400": error,
                        "422": error
                    }
                }
            },
            "/vehicle/{vin}": {
                "get": {
                    "summary": "Get a vehicle by VIN (case-insensitive)",
                    "parameters": vin_param,
                    "responses": {
                        "200": { "description": "Vehicle", "content": { "application/json": { "schema": vehicle } } },
                        "404": error
                    }
                },
                "put": {
                    "summary": "Replace every field of a vehicle except its VIN",
                    "parameters": vin_param,
                    "requestBody": body,
                    "responses": {
                        "200": { "description": "Updated", "content": { "application/json": { "schema": vehicle } } },
                        "400": error,
                        "404": error,
                        "422": error
                    }
                },
                "delete": {
                    "summary": "Delete a vehicle",
                    "parameters": vin_param,
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": error
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Vehicle": {
                    "type": "object",
                    "required": ["vin", "manufacturer_name", "description", "horse_power", "model_name", "model_year", "purchase_price", "fuel_type"],
                    "properties": {
                        "vin": { "type": "string" },
                        "manufacturer_name": { "type": "string" },
                        "description": { "type": "string" },
                        "horse_power": { "type": "integer", "format": "int32" },
                        "model_name": { "type": "string" },
                        "model_year": { "type": "integer", "format": "int32" },
                        "purchase_price": { "type": "number", "format": "double" },
                        "fuel_type": { "type": "string" }
                    }
                },
                "VehicleBody": vehicle_body_schema(policy),
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "error": {
                            "oneOf": [
                                { "type": "string" },
                                { "type": "array", "items": { "type": "object" } }
                            ]
                        }
                    }
                }
            }
        }
    })
}
