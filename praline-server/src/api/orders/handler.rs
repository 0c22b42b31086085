//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderStatus, OrderStatusUpdate};
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "order";

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

/// GET /api/orders - list orders, optionally filtered by status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = match query.status {
        Some(status) => repo.find_by_status(status).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// POST /api/orders - create; product names and prices are snapshotted
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(payload).await?;

    let id = order.id.as_ref().map(|r| r.to_string());
    state.broadcast_change(RESOURCE, id.as_deref(), "created");

    Ok(Json(order))
}

/// POST /api/orders/:id/status - move the order along its lifecycle
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    if !order.status.can_transition_to(payload.status) {
        return Err(AppError::business_rule(format!(
            "invalid status transition: {:?} -> {:?}",
            order.status, payload.status
        )));
    }

    let order = repo.set_status(&id, payload.status).await?;

    state.broadcast_change(RESOURCE, Some(&id), "status_changed");

    Ok(Json(order))
}

/// DELETE /api/orders/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OrderRepository::new(state.db.clone());
    repo.delete(&id).await?;

    state.broadcast_change(RESOURCE, Some(&id), "deleted");

    Ok(Json(true))
}
