//! Packaging Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::costing::calculator;
use crate::db::models::{Packaging, PackagingCreate, PackagingUpdate};
use crate::utils::validation;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PACKAGING_TABLE: &str = "packaging";

#[derive(Clone)]
pub struct PackagingRepository {
    base: BaseRepository,
}

impl PackagingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active packaging
    pub async fn find_all(&self) -> RepoResult<Vec<Packaging>> {
        let packaging: Vec<Packaging> = self
            .base
            .db()
            .query("SELECT * FROM packaging WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(packaging)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Packaging>> {
        let packaging: Option<Packaging> = self
            .base
            .db()
            .select(make_record_id(PACKAGING_TABLE, id))
            .await?;
        Ok(packaging)
    }

    pub async fn create(&self, data: PackagingCreate) -> RepoResult<Packaging> {
        validation::require_name(&data.name, "name")?;
        validation::require_quantity(data.bulk_quantity, "bulk_quantity")?;
        validation::require_amount(data.bulk_price, "bulk_price")?;
        self.ensure_name_free(&data.name).await?;

        let unit_cost = calculator::unit_cost(data.bulk_quantity, data.bulk_price);
        let packaging = Packaging::new(
            data.name.trim().to_string(),
            data.bulk_quantity,
            data.bulk_price,
            unit_cost,
        );

        let created: Option<Packaging> = self
            .base
            .db()
            .create(PACKAGING_TABLE)
            .content(packaging)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create packaging".to_string()))
    }

    pub async fn update(&self, id: &str, data: PackagingUpdate) -> RepoResult<Packaging> {
        let record_id = make_record_id(PACKAGING_TABLE, id);
        let mut packaging = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Packaging {} not found", id)))?;

        if let Some(name) = data.name {
            validation::require_name(&name, "name")?;
            packaging.name = name.trim().to_string();
        }
        if let Some(quantity) = data.bulk_quantity {
            validation::require_quantity(quantity, "bulk_quantity")?;
            packaging.bulk_quantity = quantity;
        }
        if let Some(price) = data.bulk_price {
            validation::require_amount(price, "bulk_price")?;
            packaging.bulk_price = price;
        }
        if let Some(active) = data.is_active {
            packaging.is_active = active;
        }

        packaging.unit_cost =
            calculator::unit_cost(packaging.bulk_quantity, packaging.bulk_price);

        let updated: Option<Packaging> = self
            .base
            .db()
            .update(record_id)
            .content(packaging)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Packaging {} not found", id)))
    }

    /// Hard delete; dangling product packaging lines are repaired by the
    /// next cost sync
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result: Option<Packaging> = self
            .base
            .db()
            .delete(make_record_id(PACKAGING_TABLE, id))
            .await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Packaging {} not found", id)));
        }
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str) -> RepoResult<()> {
        let name = name.trim().to_string();
        let existing: Vec<Packaging> = self
            .base
            .db()
            .query("SELECT * FROM packaging WHERE name = $name AND is_active = true LIMIT 1")
            .bind(("name", name.clone()))
            .await?
            .take(0)?;
        if existing.is_empty() {
            Ok(())
        } else {
            Err(RepoError::Duplicate(format!(
                "Packaging '{}' already exists",
                name
            )))
        }
    }
}
