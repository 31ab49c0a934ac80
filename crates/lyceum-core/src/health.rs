use axum::Json;
use serde_json::{Value, json};

/// Handler for `GET /healthz` — liveness probe. Answers as long as the
/// process is serving requests.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for `GET /readyz` — readiness probe. Connection pools are lazy, so
/// a process that reached its serve loop is ready to take traffic.
pub async fn readyz() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}
