//! Accounts Payable API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Payable, PayableCreate, PayableStatus, PayableUpdate};
use crate::db::repository::PayableRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "payable";

#[derive(Debug, Deserialize)]
pub struct PayableListQuery {
    #[serde(default)]
    pub pending: bool,
}

/// GET /api/payables - list payables; `?pending=true` filters to unpaid
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PayableListQuery>,
) -> AppResult<Json<Vec<Payable>>> {
    let repo = PayableRepository::new(state.db.clone());
    let payables = if query.pending {
        repo.find_pending().await?
    } else {
        repo.find_all().await?
    };
    Ok(Json(payables))
}

/// GET /api/payables/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Payable>> {
    let repo = PayableRepository::new(state.db.clone());
    let payable = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payable {} not found", id)))?;
    Ok(Json(payable))
}

/// POST /api/payables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PayableCreate>,
) -> AppResult<Json<Payable>> {
    let repo = PayableRepository::new(state.db.clone());
    let payable = repo.create(payload).await?;

    let id = payable.id.as_ref().map(|r| r.to_string());
    state.broadcast_change(RESOURCE, id.as_deref(), "created");

    Ok(Json(payable))
}

/// PUT /api/payables/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PayableUpdate>,
) -> AppResult<Json<Payable>> {
    let repo = PayableRepository::new(state.db.clone());
    let payable = repo.update(&id, payload).await?;

    state.broadcast_change(RESOURCE, Some(&id), "updated");

    Ok(Json(payable))
}

/// POST /api/payables/:id/pay - mark as paid
pub async fn pay(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Payable>> {
    let repo = PayableRepository::new(state.db.clone());
    let payable = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payable {} not found", id)))?;

    if payable.status == PayableStatus::Paid {
        return Err(AppError::business_rule("payable is already paid"));
    }

    let payable = repo.set_status(&id, PayableStatus::Paid).await?;

    state.broadcast_change(RESOURCE, Some(&id), "paid");

    Ok(Json(payable))
}

/// DELETE /api/payables/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = PayableRepository::new(state.db.clone());
    repo.delete(&id).await?;

    state.broadcast_change(RESOURCE, Some(&id), "deleted");

    Ok(Json(true))
}
