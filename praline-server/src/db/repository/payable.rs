//! Accounts Payable Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::db::models::{Payable, PayableCreate, PayableStatus, PayableUpdate};
use crate::utils::validation;
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PAYABLE_TABLE: &str = "payable";

#[derive(Clone)]
pub struct PayableRepository {
    base: BaseRepository,
}

impl PayableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All payables, most recent first
    pub async fn find_all(&self) -> RepoResult<Vec<Payable>> {
        let payables: Vec<Payable> = self
            .base
            .db()
            .query("SELECT * FROM payable ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(payables)
    }

    /// Payables still awaiting payment
    pub async fn find_pending(&self) -> RepoResult<Vec<Payable>> {
        let payables: Vec<Payable> = self
            .base
            .db()
            .query("SELECT * FROM payable WHERE status = $status ORDER BY due_date")
            .bind(("status", PayableStatus::Pending))
            .await?
            .take(0)?;
        Ok(payables)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payable>> {
        let payable: Option<Payable> = self
            .base
            .db()
            .select(make_record_id(PAYABLE_TABLE, id))
            .await?;
        Ok(payable)
    }

    pub async fn create(&self, data: PayableCreate) -> RepoResult<Payable> {
        validation::require_name(&data.supplier, "supplier")?;
        validation::require_name(&data.description, "description")?;
        validation::require_amount(data.amount, "amount")?;

        let payable = Payable {
            id: None,
            supplier: data.supplier.trim().to_string(),
            description: data.description.trim().to_string(),
            amount: data.amount,
            due_date: data.due_date,
            status: PayableStatus::Pending,
            created_at: Utc::now(),
        };

        let created: Option<Payable> = self
            .base
            .db()
            .create(PAYABLE_TABLE)
            .content(payable)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create payable".to_string()))
    }

    pub async fn update(&self, id: &str, data: PayableUpdate) -> RepoResult<Payable> {
        let record_id = make_record_id(PAYABLE_TABLE, id);
        let mut payable = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Payable {} not found", id)))?;

        if let Some(supplier) = data.supplier {
            validation::require_name(&supplier, "supplier")?;
            payable.supplier = supplier.trim().to_string();
        }
        if let Some(description) = data.description {
            validation::require_name(&description, "description")?;
            payable.description = description.trim().to_string();
        }
        if let Some(amount) = data.amount {
            validation::require_amount(amount, "amount")?;
            payable.amount = amount;
        }
        if data.due_date.is_some() {
            payable.due_date = data.due_date;
        }

        let updated: Option<Payable> = self
            .base
            .db()
            .update(record_id)
            .content(payable)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Payable {} not found", id)))
    }

    /// Persist the paid status; double-pay checks are the caller's concern
    pub async fn set_status(&self, id: &str, status: PayableStatus) -> RepoResult<Payable> {
        let record_id = make_record_id(PAYABLE_TABLE, id);
        let mut payable = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Payable {} not found", id)))?;

        payable.status = status;

        let updated: Option<Payable> = self
            .base
            .db()
            .update(record_id)
            .content(payable)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Payable {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result: Option<Payable> = self
            .base
            .db()
            .delete(make_record_id(PAYABLE_TABLE, id))
            .await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Payable {} not found", id)));
        }
        Ok(())
    }
}
