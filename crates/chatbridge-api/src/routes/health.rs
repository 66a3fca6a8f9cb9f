use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
///
/// Returns the health status of the relay and its dependencies
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HealthResponse>> {
    let mut services = HashMap::new();

    let storage_ok = match state.store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            false
        }
    };
    let storage = if storage_ok { "connected" } else { "disconnected" };
    services.insert("storage".to_string(), storage.to_string());

    let inference = if state.inference.is_configured() {
        "configured"
    } else {
        "missing_api_key"
    };
    services.insert("inference".to_string(), inference.to_string());

    services.insert(
        "connections".to_string(),
        state.registry.len().await.to_string(),
    );

    let status = if storage_ok { "healthy" } else { "degraded" };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    }))
}
