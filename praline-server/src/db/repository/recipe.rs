//! Recipe Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::db::models::{
    Recipe, RecipeCreate, RecipeItem, RecipeItemCreate, RecipeItemKind, RecipeItemUpdate,
    RecipeUpdate, serde_helpers,
};
use crate::utils::validation;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const RECIPE_TABLE: &str = "recipe";
const RECIPE_ITEM_TABLE: &str = "recipe_item";

/// Referenced ingredient fields needed for costing
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientRef {
    pub name: String,
    #[serde(default)]
    pub unit_cost: f64,
}

/// Recipe line with the referenced ingredient fetched
///
/// `ingredient` is `None` when the link dangles (the ingredient was
/// deleted); the costing pipeline prices such lines at zero and reports
/// the anomaly.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeItemRow {
    #[serde(with = "serde_helpers::record_id")]
    pub id: RecordId,
    pub kind: RecipeItemKind,
    pub quantity: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub ingredient: Option<IngredientRef>,
}

#[derive(Clone)]
pub struct RecipeRepository {
    base: BaseRepository,
}

impl RecipeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active recipes
    pub async fn find_all(&self) -> RepoResult<Vec<Recipe>> {
        let recipes: Vec<Recipe> = self
            .base
            .db()
            .query("SELECT * FROM recipe WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(recipes)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Recipe>> {
        let recipe: Option<Recipe> = self
            .base
            .db()
            .select(make_record_id(RECIPE_TABLE, id))
            .await?;
        Ok(recipe)
    }

    /// Create a recipe; costs start at zero until lines are added and the
    /// first recomputation runs
    pub async fn create(&self, data: RecipeCreate) -> RepoResult<Recipe> {
        validation::require_name(&data.name, "name")?;
        validation::require_portions(data.portions)?;
        validation::require_note(&data.notes, "notes")?;

        let recipe = Recipe::new(data.name.trim().to_string(), data.portions, data.notes);
        let created: Option<Recipe> = self
            .base
            .db()
            .create(RECIPE_TABLE)
            .content(recipe)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create recipe".to_string()))
    }

    /// Update recipe fields; derived costs are left as-is and refreshed by
    /// the costing pipeline
    pub async fn update(&self, id: &str, data: RecipeUpdate) -> RepoResult<Recipe> {
        let record_id = make_record_id(RECIPE_TABLE, id);
        let mut recipe = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Recipe {} not found", id)))?;

        if let Some(name) = data.name {
            validation::require_name(&name, "name")?;
            recipe.name = name.trim().to_string();
        }
        if let Some(portions) = data.portions {
            validation::require_portions(portions)?;
            recipe.portions = portions;
        }
        if let Some(notes) = data.notes {
            let notes = Some(notes);
            validation::require_note(&notes, "notes")?;
            recipe.notes = notes;
        }
        if let Some(active) = data.is_active {
            recipe.is_active = active;
        }

        let updated: Option<Recipe> = self
            .base
            .db()
            .update(record_id)
            .content(recipe)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Recipe {} not found", id)))
    }

    /// Hard delete a recipe and its own lines.
    ///
    /// Product lines referencing the recipe are left in place and repaired
    /// by the next cost sync.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record_id = make_record_id(RECIPE_TABLE, id);

        self.base
            .db()
            .query("DELETE recipe_item WHERE recipe = $recipe")
            .bind(("recipe", record_id.clone()))
            .await?;

        let result: Option<Recipe> = self.base.db().delete(record_id).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Recipe {} not found", id)));
        }
        Ok(())
    }

    // =========================================================================
    // Recipe lines
    // =========================================================================

    /// Add an ingredient line; its cost is derived on the next recomputation
    pub async fn add_item(&self, recipe_id: &str, data: RecipeItemCreate) -> RepoResult<RecipeItem> {
        validation::require_quantity(data.quantity, "quantity")?;

        let recipe = make_record_id(RECIPE_TABLE, recipe_id);
        let recipe_exists: Option<Recipe> = self.base.db().select(recipe.clone()).await?;
        if recipe_exists.is_none() {
            return Err(RepoError::NotFound(format!(
                "Recipe {} not found",
                recipe_id
            )));
        }

        let ingredient = make_record_id("ingredient", &data.ingredient_id);
        let ingredient_exists: Option<crate::db::models::Ingredient> =
            self.base.db().select(ingredient.clone()).await?;
        if ingredient_exists.is_none() {
            return Err(RepoError::NotFound(format!(
                "Ingredient {} not found",
                data.ingredient_id
            )));
        }

        let item = RecipeItem {
            id: None,
            recipe,
            ingredient,
            kind: data.kind,
            quantity: data.quantity,
            cost: 0.0,
        };
        let created: Option<RecipeItem> = self
            .base
            .db()
            .create(RECIPE_ITEM_TABLE)
            .content(item)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create recipe item".to_string()))
    }

    pub async fn update_item(&self, item_id: &str, data: RecipeItemUpdate) -> RepoResult<RecipeItem> {
        validation::require_quantity(data.quantity, "quantity")?;

        let record_id = make_record_id(RECIPE_ITEM_TABLE, item_id);
        let mut item: RecipeItem = self
            .base
            .db()
            .select(record_id.clone())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Recipe item {} not found", item_id)))?;

        item.quantity = data.quantity;

        let updated: Option<RecipeItem> = self
            .base
            .db()
            .update(record_id)
            .content(item)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Recipe item {} not found", item_id)))
    }

    pub async fn remove_item(&self, item_id: &str) -> RepoResult<()> {
        let result: Option<RecipeItem> = self
            .base
            .db()
            .delete(make_record_id(RECIPE_ITEM_TABLE, item_id))
            .await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!(
                "Recipe item {} not found",
                item_id
            )));
        }
        Ok(())
    }

    /// Lines of a recipe with the referenced ingredient fetched
    pub async fn items_with_ingredients(
        &self,
        recipe_id: &RecordId,
    ) -> RepoResult<Vec<RecipeItemRow>> {
        let rows: Vec<RecipeItemRow> = self
            .base
            .db()
            .query("SELECT * FROM recipe_item WHERE recipe = $recipe FETCH ingredient")
            .bind(("recipe", recipe_id.clone()))
            .await?
            .take(0)?;
        Ok(rows)
    }

    // =========================================================================
    // Derived-cost writes (used by the costing pipeline only)
    // =========================================================================

    pub async fn set_item_cost(&self, item_id: &RecordId, cost: f64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $item SET cost = $cost")
            .bind(("item", item_id.clone()))
            .bind(("cost", cost))
            .await?;
        Ok(())
    }

    pub async fn set_costs(
        &self,
        recipe_id: &RecordId,
        total_cost: f64,
        unit_cost: f64,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $recipe SET total_cost = $total_cost, unit_cost = $unit_cost")
            .bind(("recipe", recipe_id.clone()))
            .bind(("total_cost", total_cost))
            .bind(("unit_cost", unit_cost))
            .await?;
        Ok(())
    }
}
