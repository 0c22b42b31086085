//! Reports API Handlers
//!
//! Aggregations are computed in-process over repository reads; at the data
//! volumes of a small confectionery this beats pushing math into queries.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::costing::calculator;
use crate::db::models::OrderStatus;
use crate::db::repository::{
    IngredientRepository, OrderRepository, PayableRepository, ProductRepository, RecipeRepository,
};
use crate::utils::AppResult;

/// Dashboard summary counters
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub active_ingredients: usize,
    pub active_recipes: usize,
    pub active_products: usize,
    /// Orders not yet delivered or cancelled
    pub open_orders: usize,
    /// Revenue from delivered orders
    pub delivered_revenue: f64,
    /// Outstanding accounts payable
    pub pending_payables_total: f64,
}

/// Per-product margin row
#[derive(Debug, Serialize)]
pub struct ProductMargin {
    pub id: Option<String>,
    pub name: String,
    pub total_cost: f64,
    pub sale_price: f64,
    /// Margin over the sale price in percent; zero when unpriced
    pub margin_percent: f64,
}

/// GET /api/reports/dashboard
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<DashboardSummary>> {
    let ingredients = IngredientRepository::new(state.db.clone()).find_all().await?;
    let recipes = RecipeRepository::new(state.db.clone()).find_all().await?;
    let products = ProductRepository::new(state.db.clone()).find_all().await?;

    let order_repo = OrderRepository::new(state.db.clone());
    let orders = order_repo.find_all().await?;
    let open_orders = orders
        .iter()
        .filter(|order| !order.status.is_final())
        .count();
    let delivered_totals: Vec<f64> = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Delivered)
        .map(|order| order.total)
        .collect();

    let pending = PayableRepository::new(state.db.clone()).find_pending().await?;
    let pending_amounts: Vec<f64> = pending.iter().map(|payable| payable.amount).collect();

    Ok(Json(DashboardSummary {
        active_ingredients: ingredients.len(),
        active_recipes: recipes.len(),
        active_products: products.len(),
        open_orders,
        delivered_revenue: calculator::sum_money(&delivered_totals),
        pending_payables_total: calculator::sum_money(&pending_amounts),
    }))
}

/// GET /api/reports/margins - cost vs sale price per active product
pub async fn margins(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductMargin>>> {
    let products = ProductRepository::new(state.db.clone()).find_all().await?;

    let rows = products
        .into_iter()
        .map(|product| ProductMargin {
            id: product.id.as_ref().map(|r| r.to_string()),
            name: product.name,
            total_cost: product.total_cost,
            sale_price: product.sale_price,
            margin_percent: calculator::margin_percent(product.sale_price, product.total_cost),
        })
        .collect();

    Ok(Json(rows))
}
