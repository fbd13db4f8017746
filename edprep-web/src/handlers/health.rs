//! Liveness probe

use super::types::HealthResponse;
use axum::response::Json;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
