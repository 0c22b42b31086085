//! Product API Handlers
//!
//! Line mutations recompute the product's total before returning, the same
//! way recipe handlers do.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{
    Product, ProductCreate, ProductPackagingItem, ProductPackagingItemCreate,
    ProductPackagingItemUpdate, ProductRecipeItem, ProductRecipeItemCreate,
    ProductRecipeItemUpdate, ProductUpdate,
};
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "product";

fn log_anomalies(anomalies: &[String]) {
    for anomaly in anomalies {
        tracing::warn!("{}", anomaly);
    }
}

/// GET /api/products - list active products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// POST /api/products - create; the total cost starts at zero until lines
/// are added
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;

    let id = product.id.as_ref().map(|r| r.to_string());
    state.broadcast_change(RESOURCE, id.as_deref(), "created");

    Ok(Json(product))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id).await?;

    state.broadcast_change(RESOURCE, Some(&id), "deleted");

    Ok(Json(true))
}

/// POST /api/products/:id/recalculate - re-sum this product's lines
pub async fn recalculate(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let (product, anomalies) = state.cost_sync.sync_product(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "recalculated");

    Ok(Json(product))
}

// =============================================================================
// Recipe lines
// =============================================================================

/// POST /api/products/:id/recipe-items
pub async fn add_recipe_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductRecipeItemCreate>,
) -> AppResult<Json<ProductRecipeItem>> {
    let repo = ProductRepository::new(state.db.clone());
    let item = repo.add_recipe_item(&id, payload).await?;

    let (_, anomalies) = state.cost_sync.sync_product(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(item))
}

/// PUT /api/products/:id/recipe-items/:item_id
pub async fn update_recipe_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<ProductRecipeItemUpdate>,
) -> AppResult<Json<ProductRecipeItem>> {
    let repo = ProductRepository::new(state.db.clone());
    let item = repo.update_recipe_item(&item_id, payload).await?;

    let (_, anomalies) = state.cost_sync.sync_product(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(item))
}

/// DELETE /api/products/:id/recipe-items/:item_id
pub async fn remove_recipe_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.remove_recipe_item(&item_id).await?;

    let (_, anomalies) = state.cost_sync.sync_product(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(true))
}

// =============================================================================
// Packaging lines
// =============================================================================

/// POST /api/products/:id/packaging-items
pub async fn add_packaging_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPackagingItemCreate>,
) -> AppResult<Json<ProductPackagingItem>> {
    let repo = ProductRepository::new(state.db.clone());
    let item = repo.add_packaging_item(&id, payload).await?;

    let (_, anomalies) = state.cost_sync.sync_product(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(item))
}

/// PUT /api/products/:id/packaging-items/:item_id
pub async fn update_packaging_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<ProductPackagingItemUpdate>,
) -> AppResult<Json<ProductPackagingItem>> {
    let repo = ProductRepository::new(state.db.clone());
    let item = repo.update_packaging_item(&item_id, payload).await?;

    let (_, anomalies) = state.cost_sync.sync_product(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(item))
}

/// DELETE /api/products/:id/packaging-items/:item_id
pub async fn remove_packaging_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.remove_packaging_item(&item_id).await?;

    let (_, anomalies) = state.cost_sync.sync_product(&id).await?;
    log_anomalies(&anomalies);

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(true))
}
