//! Costing API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::costing::SyncReport;
use crate::utils::AppResult;

/// POST /api/costing/sync - recompute every derived cost in the system
///
/// Partial success is a normal outcome: the report carries the update
/// counts plus any per-entity anomalies. Only a failure to enumerate
/// recipes or products fails the request itself.
pub async fn sync_all(State(state): State<ServerState>) -> AppResult<Json<SyncReport>> {
    let report = state.cost_sync.sync_all().await?;
    Ok(Json(report))
}
