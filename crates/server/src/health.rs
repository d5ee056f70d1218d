//! Liveness probe. Fixed payload, no dependency checks.

use api_types::health::Health;
use axum::Json;

pub async fn check() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
        database: "connected".to_string(),
    })
}
