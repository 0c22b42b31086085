//! Packaging API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Packaging, PackagingCreate, PackagingUpdate};
use crate::db::repository::PackagingRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "packaging";

/// GET /api/packaging - list active packaging
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Packaging>>> {
    let repo = PackagingRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/packaging/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Packaging>> {
    let repo = PackagingRepository::new(state.db.clone());
    let packaging = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Packaging {} not found", id)))?;
    Ok(Json(packaging))
}

/// POST /api/packaging
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PackagingCreate>,
) -> AppResult<Json<Packaging>> {
    let repo = PackagingRepository::new(state.db.clone());
    let packaging = repo.create(payload).await?;

    let id = packaging.id.as_ref().map(|r| r.to_string());
    state.broadcast_change(RESOURCE, id.as_deref(), "created");

    Ok(Json(packaging))
}

/// PUT /api/packaging/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PackagingUpdate>,
) -> AppResult<Json<Packaging>> {
    let repo = PackagingRepository::new(state.db.clone());
    let packaging = repo.update(&id, payload).await?;

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(packaging))
}

/// DELETE /api/packaging/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = PackagingRepository::new(state.db.clone());
    repo.delete(&id).await?;

    state.broadcast_change(RESOURCE, Some(&id), "deleted");

    Ok(Json(true))
}
