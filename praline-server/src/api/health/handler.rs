//! Health API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health - liveness plus a store round trip
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthStatus>> {
    state
        .db
        .health()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
