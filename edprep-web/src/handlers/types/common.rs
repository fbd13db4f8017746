//! Common types used across multiple handlers

use crate::error::ApiError;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Connection not found")]
    pub detail: String,
}

/// Success envelope without a payload
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Connection deleted successfully")]
    pub message: String,
}

/// Numeric path identity; anything else names no entity
pub fn parse_id(raw: &str, entity: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::not_found(format!("{} not found", entity)))
}
