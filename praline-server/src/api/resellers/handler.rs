//! Reseller API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Reseller, ResellerCreate, ResellerUpdate};
use crate::db::repository::ResellerRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "reseller";

/// GET /api/resellers - list active resellers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reseller>>> {
    let repo = ResellerRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/resellers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reseller>> {
    let repo = ResellerRepository::new(state.db.clone());
    let reseller = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reseller {} not found", id)))?;
    Ok(Json(reseller))
}

/// POST /api/resellers
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ResellerCreate>,
) -> AppResult<Json<Reseller>> {
    let repo = ResellerRepository::new(state.db.clone());
    let reseller = repo.create(payload).await?;

    let id = reseller.id.as_ref().map(|r| r.to_string());
    state.broadcast_change(RESOURCE, id.as_deref(), "created");

    Ok(Json(reseller))
}

/// PUT /api/resellers/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ResellerUpdate>,
) -> AppResult<Json<Reseller>> {
    let repo = ResellerRepository::new(state.db.clone());
    let reseller = repo.update(&id, payload).await?;

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(reseller))
}

/// DELETE /api/resellers/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ResellerRepository::new(state.db.clone());
    repo.delete(&id).await?;

    state.broadcast_change(RESOURCE, Some(&id), "deleted");

    Ok(Json(true))
}
