//! Ingredient API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Ingredient, IngredientCreate, IngredientUpdate};
use crate::db::repository::IngredientRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "ingredient";

/// GET /api/ingredients - list active ingredients
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Ingredient>>> {
    let repo = IngredientRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/ingredients/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Ingredient>> {
    let repo = IngredientRepository::new(state.db.clone());
    let ingredient = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ingredient {} not found", id)))?;
    Ok(Json(ingredient))
}

/// POST /api/ingredients - create; the unit cost is derived server-side
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<IngredientCreate>,
) -> AppResult<Json<Ingredient>> {
    let repo = IngredientRepository::new(state.db.clone());
    let ingredient = repo.create(payload).await?;

    let id = ingredient.id.as_ref().map(|r| r.to_string());
    state.broadcast_change(RESOURCE, id.as_deref(), "created");

    Ok(Json(ingredient))
}

/// PUT /api/ingredients/:id - update; package edits rederive the unit cost
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<IngredientUpdate>,
) -> AppResult<Json<Ingredient>> {
    let repo = IngredientRepository::new(state.db.clone());
    let ingredient = repo.update(&id, payload).await?;

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(ingredient))
}

/// DELETE /api/ingredients/:id - hard delete; recipe lines referencing it
/// are repaired by the next cost sync
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = IngredientRepository::new(state.db.clone());
    repo.delete(&id).await?;

    state.broadcast_change(RESOURCE, Some(&id), "deleted");

    Ok(Json(true))
}
