//! Reseller Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::db::models::{Reseller, ResellerCreate, ResellerUpdate};
use crate::utils::validation;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const RESELLER_TABLE: &str = "reseller";

#[derive(Clone)]
pub struct ResellerRepository {
    base: BaseRepository,
}

impl ResellerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active resellers
    pub async fn find_all(&self) -> RepoResult<Vec<Reseller>> {
        let resellers: Vec<Reseller> = self
            .base
            .db()
            .query("SELECT * FROM reseller WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(resellers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reseller>> {
        let reseller: Option<Reseller> = self
            .base
            .db()
            .select(make_record_id(RESELLER_TABLE, id))
            .await?;
        Ok(reseller)
    }

    pub async fn create(&self, data: ResellerCreate) -> RepoResult<Reseller> {
        validation::require_name(&data.name, "name")?;
        let commission = data.commission_percent.unwrap_or(0.0);
        validation::require_finite(commission, "commission_percent")?;
        if !(0.0..=100.0).contains(&commission) {
            return Err(RepoError::Validation(format!(
                "commission_percent must be between 0 and 100, got {}",
                commission
            )));
        }

        let reseller = Reseller {
            id: None,
            name: data.name.trim().to_string(),
            phone: data.phone,
            commission_percent: commission,
            is_active: true,
        };

        let created: Option<Reseller> = self
            .base
            .db()
            .create(RESELLER_TABLE)
            .content(reseller)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reseller".to_string()))
    }

    pub async fn update(&self, id: &str, data: ResellerUpdate) -> RepoResult<Reseller> {
        let record_id = make_record_id(RESELLER_TABLE, id);
        let mut reseller = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reseller {} not found", id)))?;

        if let Some(name) = data.name {
            validation::require_name(&name, "name")?;
            reseller.name = name.trim().to_string();
        }
        if data.phone.is_some() {
            reseller.phone = data.phone;
        }
        if let Some(commission) = data.commission_percent {
            validation::require_finite(commission, "commission_percent")?;
            if !(0.0..=100.0).contains(&commission) {
                return Err(RepoError::Validation(format!(
                    "commission_percent must be between 0 and 100, got {}",
                    commission
                )));
            }
            reseller.commission_percent = commission;
        }
        if let Some(active) = data.is_active {
            reseller.is_active = active;
        }

        let updated: Option<Reseller> = self
            .base
            .db()
            .update(record_id)
            .content(reseller)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Reseller {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result: Option<Reseller> = self
            .base
            .db()
            .delete(make_record_id(RESELLER_TABLE, id))
            .await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Reseller {} not found", id)));
        }
        Ok(())
    }
}
