//! Recipe API Handlers
//!
//! Any mutation that can change a recipe's cost (line edits, portion
//! changes) runs the recipe recomputation before returning, so derived
//! fields never wait for the next full sync.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{
    Recipe, RecipeCreate, RecipeItem, RecipeItemCreate, RecipeItemUpdate, RecipeUpdate,
};
use crate::db::repository::RecipeRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "recipe";

fn log_anomalies(anomalies: &[String]) {
    for anomaly in anomalies {
        tracing::warn!("{}", anomaly);
    }
}

/// GET /api/recipes - list active recipes
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Recipe>>> {
    let repo = RecipeRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/recipes/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Recipe>> {
    let repo = RecipeRepository::new(state.db.clone());
    let recipe = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {} not found", id)))?;
    Ok(Json(recipe))
}

/// POST /api/recipes - create; costs start at zero until lines are added
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RecipeCreate>,
) -> AppResult<Json<Recipe>> {
    let repo = RecipeRepository::new(state.db.clone());
    let recipe = repo.create(payload).await?;

    let id = recipe.id.as_ref().map(|r| r.to_string());
    state.broadcast_change(RESOURCE, id.as_deref(), "created");

    Ok(Json(recipe))
}

/// PUT /api/recipes/:id - update; portion changes re-derive the costs
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RecipeUpdate>,
) -> AppResult<Json<Recipe>> {
    let repo = RecipeRepository::new(state.db.clone());
    repo.update(&id, payload).await?;

    let (recipe, anomalies) = state.cost_sync.sync_recipe(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(recipe))
}

/// DELETE /api/recipes/:id - hard delete; product lines referencing the
/// recipe are repaired by the next cost sync
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = RecipeRepository::new(state.db.clone());
    repo.delete(&id).await?;

    state.broadcast_change(RESOURCE, Some(&id), "deleted");

    Ok(Json(true))
}

/// POST /api/recipes/:id/recalculate - recompute this recipe and the
/// products it prices
pub async fn recalculate(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Recipe>> {
    let (recipe, anomalies) = state.cost_sync.sync_recipe(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "recalculated");

    Ok(Json(recipe))
}

// =============================================================================
// Recipe lines
// =============================================================================

/// POST /api/recipes/:id/items - add an ingredient line
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RecipeItemCreate>,
) -> AppResult<Json<RecipeItem>> {
    let repo = RecipeRepository::new(state.db.clone());
    let item = repo.add_item(&id, payload).await?;

    let (_, anomalies) = state.cost_sync.sync_recipe(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(item))
}

/// PUT /api/recipes/:id/items/:item_id - change a line quantity
pub async fn update_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<RecipeItemUpdate>,
) -> AppResult<Json<RecipeItem>> {
    let repo = RecipeRepository::new(state.db.clone());
    let item = repo.update_item(&item_id, payload).await?;

    let (_, anomalies) = state.cost_sync.sync_recipe(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(item))
}

/// DELETE /api/recipes/:id/items/:item_id - remove a line
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let repo = RecipeRepository::new(state.db.clone());
    repo.remove_item(&item_id).await?;

    let (_, anomalies) = state.cost_sync.sync_recipe(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(true))
}
