//! Ingredient Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::costing::calculator;
use crate::db::models::{Ingredient, IngredientCreate, IngredientUpdate};
use crate::utils::validation;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const INGREDIENT_TABLE: &str = "ingredient";

#[derive(Clone)]
pub struct IngredientRepository {
    base: BaseRepository,
}

impl IngredientRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active ingredients
    pub async fn find_all(&self) -> RepoResult<Vec<Ingredient>> {
        let ingredients: Vec<Ingredient> = self
            .base
            .db()
            .query("SELECT * FROM ingredient WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(ingredients)
    }

    /// Find ingredient by id (active or not)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Ingredient>> {
        let ingredient: Option<Ingredient> = self
            .base
            .db()
            .select(make_record_id(INGREDIENT_TABLE, id))
            .await?;
        Ok(ingredient)
    }

    /// Create a new ingredient; the unit cost is derived here, not taken
    /// from the caller
    pub async fn create(&self, data: IngredientCreate) -> RepoResult<Ingredient> {
        validation::require_name(&data.name, "name")?;
        validation::require_name(&data.unit, "unit")?;
        validation::require_quantity(data.package_quantity, "package_quantity")?;
        validation::require_amount(data.package_price, "package_price")?;
        self.ensure_name_free(&data.name).await?;

        let unit_cost = calculator::unit_cost(data.package_quantity, data.package_price);
        let ingredient = Ingredient::new(
            data.name.trim().to_string(),
            data.unit.trim().to_string(),
            data.package_quantity,
            data.package_price,
            unit_cost,
        );

        let created: Option<Ingredient> = self
            .base
            .db()
            .create(INGREDIENT_TABLE)
            .content(ingredient)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create ingredient".to_string()))
    }

    /// Update an ingredient; the unit cost is rederived whenever the
    /// package fields change
    pub async fn update(&self, id: &str, data: IngredientUpdate) -> RepoResult<Ingredient> {
        let record_id = make_record_id(INGREDIENT_TABLE, id);
        let mut ingredient = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Ingredient {} not found", id)))?;

        if let Some(name) = data.name {
            validation::require_name(&name, "name")?;
            ingredient.name = name.trim().to_string();
        }
        if let Some(unit) = data.unit {
            validation::require_name(&unit, "unit")?;
            ingredient.unit = unit.trim().to_string();
        }
        if let Some(quantity) = data.package_quantity {
            validation::require_quantity(quantity, "package_quantity")?;
            ingredient.package_quantity = quantity;
        }
        if let Some(price) = data.package_price {
            validation::require_amount(price, "package_price")?;
            ingredient.package_price = price;
        }
        if let Some(active) = data.is_active {
            ingredient.is_active = active;
        }

        ingredient.unit_cost =
            calculator::unit_cost(ingredient.package_quantity, ingredient.package_price);

        let updated: Option<Ingredient> = self
            .base
            .db()
            .update(record_id)
            .content(ingredient)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Ingredient {} not found", id)))
    }

    /// Hard delete an ingredient.
    ///
    /// Recipe lines referencing it go stale until the next cost sync, which
    /// prices them at zero and reports the dangling reference.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result: Option<Ingredient> = self
            .base
            .db()
            .delete(make_record_id(INGREDIENT_TABLE, id))
            .await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Ingredient {} not found", id)));
        }
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str) -> RepoResult<()> {
        let name = name.trim().to_string();
        let existing: Vec<Ingredient> = self
            .base
            .db()
            .query("SELECT * FROM ingredient WHERE name = $name AND is_active = true LIMIT 1")
            .bind(("name", name.clone()))
            .await?
            .take(0)?;
        if existing.is_empty() {
            Ok(())
        } else {
            Err(RepoError::Duplicate(format!(
                "Ingredient '{}' already exists",
                name
            )))
        }
    }
}
