//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::costing::calculator;
use crate::db::models::{Order, OrderCreate, OrderItem, OrderStatus};
use crate::utils::validation;
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "customer_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM customer_order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders in a given status, newest first
    pub async fn find_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM customer_order WHERE status = $status ORDER BY created_at DESC")
            .bind(("status", status))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self
            .base
            .db()
            .select(make_record_id(ORDER_TABLE, id))
            .await?;
        Ok(order)
    }

    /// Create an order.
    ///
    /// Product names and prices are snapshotted into the lines so later
    /// catalog edits never rewrite past orders; the total is derived from
    /// the snapshots.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        validation::require_name(&data.customer_name, "customer_name")?;
        validation::require_note(&data.notes, "notes")?;
        if data.items.is_empty() {
            return Err(RepoError::Validation(
                "order must have at least one item".to_string(),
            ));
        }

        let mut items = Vec::with_capacity(data.items.len());
        let mut line_totals = Vec::with_capacity(data.items.len());
        for input in &data.items {
            if input.quantity < 1 {
                return Err(RepoError::Validation(format!(
                    "quantity must be at least 1, got {}",
                    input.quantity
                )));
            }
            let product_id = make_record_id("product", &input.product_id);
            let product: Option<crate::db::models::Product> =
                self.base.db().select(product_id.clone()).await?;
            let product = product.ok_or_else(|| {
                RepoError::NotFound(format!("Product {} not found", input.product_id))
            })?;

            let line_total = calculator::line_cost(input.quantity as f64, product.sale_price);
            line_totals.push(line_total);
            items.push(OrderItem {
                product: product_id,
                name: product.name,
                quantity: input.quantity,
                unit_price: product.sale_price,
            });
        }

        let reseller = match &data.reseller_id {
            Some(id) => {
                let reseller_id = make_record_id("reseller", id);
                let exists: Option<crate::db::models::Reseller> =
                    self.base.db().select(reseller_id.clone()).await?;
                if exists.is_none() {
                    return Err(RepoError::NotFound(format!("Reseller {} not found", id)));
                }
                Some(reseller_id)
            }
            None => None,
        };

        let order = Order {
            id: None,
            customer_name: data.customer_name.trim().to_string(),
            reseller,
            items,
            status: OrderStatus::Pending,
            total: calculator::sum_money(&line_totals),
            notes: data.notes,
            delivery_date: data.delivery_date,
            created_at: Utc::now(),
        };

        let created: Option<Order> = self
            .base
            .db()
            .create(ORDER_TABLE)
            .content(order)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Persist a status change; transition legality is the caller's check
    pub async fn set_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let record_id = make_record_id(ORDER_TABLE, id);
        let mut order: Order = self
            .base
            .db()
            .select(record_id.clone())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        order.status = status;

        let updated: Option<Order> = self
            .base
            .db()
            .update(record_id)
            .content(order)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result: Option<Order> = self
            .base
            .db()
            .delete(make_record_id(ORDER_TABLE, id))
            .await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }
        Ok(())
    }
}
