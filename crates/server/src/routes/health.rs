use axum::Json;
use common::types::Health;

/// Liveness probe.
#[utoipa::path(get, path = "/healthz", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn healthz() -> Json<Health> {
    Json(Health::ok())
}

/// Readiness probe.
///
/// The in-memory store has nothing to warm up.
#[utoipa::path(get, path = "/readyz", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn readyz() -> Json<Health> {
    Json(Health::ok())
}
