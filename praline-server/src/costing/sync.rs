//! Cost Synchronization
//!
//! The fetch → compute → persist pipeline that keeps every derived cost
//! consistent with the current leaf values, in dependency order:
//!
//! 1. every recipe is re-aggregated from its ingredient lines, and the
//!    product lines priced by that recipe are refreshed immediately;
//! 2. only after all recipes are done, every product total is re-summed.
//!
//! So ingredient costs are never stale when a recipe is computed, and
//! recipe costs are never stale when a product is computed.
//!
//! One failing entity is reported and skipped, never aborting the batch; a
//! failure to enumerate a phase's entities aborts the sync, since there is
//! nothing to iterate. Writes per entity are sequential and independent:
//! no transaction spans them, and concurrent syncs race with the last
//! writer winning.

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::calculator::{self, CostLine};
use crate::core::events::EventBus;
use crate::db::models::{Product, Recipe, RecipeItemKind};
use crate::db::repository::{
    ProductRepository, RecipeRepository, RepoError, RepoResult,
    recipe::RecipeItemRow,
};

/// Outcome of a full cost synchronization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub updated_recipes: usize,
    pub updated_products: usize,
    /// Human-readable anomalies and per-entity failures; partial success is
    /// a normal outcome
    pub errors: Vec<String>,
}

/// Recomputes derived costs against the store
#[derive(Clone)]
pub struct CostSyncService {
    recipes: RecipeRepository,
    products: ProductRepository,
    events: EventBus,
}

impl CostSyncService {
    pub fn new(db: Surreal<Db>, events: EventBus) -> Self {
        Self {
            recipes: RecipeRepository::new(db.clone()),
            products: ProductRepository::new(db),
            events,
        }
    }

    /// Recompute every derived cost in the system.
    ///
    /// Running this twice with unchanged leaf values produces identical
    /// results.
    pub async fn sync_all(&self) -> RepoResult<SyncReport> {
        let mut report = SyncReport::default();
        tracing::info!("Cost sync started");

        // Phase 1: recipes, plus the product lines each recipe prices
        let recipes = self.recipes.find_all().await?;
        for recipe in &recipes {
            match self.resync_recipe(recipe).await {
                Ok(anomalies) => {
                    report.updated_recipes += 1;
                    report.errors.extend(anomalies);
                }
                Err(e) => {
                    tracing::warn!(recipe = %recipe.name, error = %e, "recipe sync failed");
                    report.errors.push(format!("recipe '{}': {}", recipe.name, e));
                }
            }
        }

        // Phase 2: product totals, re-summed from the line costs phase 1
        // refreshed. Must not start before every recipe has been processed.
        let products = self.products.find_all().await?;
        for product in &products {
            match self.resync_product(product).await {
                Ok(anomalies) => {
                    report.updated_products += 1;
                    report.errors.extend(anomalies);
                }
                Err(e) => {
                    tracing::warn!(product = %product.name, error = %e, "product sync failed");
                    report.errors.push(format!("product '{}': {}", product.name, e));
                }
            }
        }

        tracing::info!(
            updated_recipes = report.updated_recipes,
            updated_products = report.updated_products,
            errors = report.errors.len(),
            "Cost sync finished"
        );
        self.events.costs_synced(&report);
        Ok(report)
    }

    /// Recompute one recipe and everything it prices.
    ///
    /// Returns the refreshed recipe plus any anomaly messages.
    pub async fn sync_recipe(&self, id: &str) -> RepoResult<(Recipe, Vec<String>)> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Recipe {} not found", id)))?;

        let mut anomalies = self.resync_recipe(&recipe).await?;

        // The line refresh above changed item costs; bring the owning
        // product totals along
        if let Some(recipe_id) = &recipe.id {
            for product_id in self.product_ids_for_recipe(recipe_id).await? {
                let Some(product) = self.products.find_by_id(&product_id.to_string()).await? else {
                    continue;
                };
                anomalies.extend(self.resync_product(&product).await?);
            }
        }

        let refreshed = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Recipe {} not found", id)))?;
        Ok((refreshed, anomalies))
    }

    /// Recompute one product's total from its current line references
    pub async fn sync_product(&self, id: &str) -> RepoResult<(Product, Vec<String>)> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        let anomalies = self.resync_product(&product).await?;

        let refreshed = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;
        Ok((refreshed, anomalies))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Refresh one recipe's line costs, aggregates, and the product lines
    /// it prices. Line costs are written before the aggregates so a stale
    /// per-line cost never survives a recomputation.
    async fn resync_recipe(&self, recipe: &Recipe) -> RepoResult<Vec<String>> {
        let recipe_id = recipe
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("recipe record has no id".to_string()))?;

        let rows = self.recipes.items_with_ingredients(&recipe_id).await?;
        let mut base_rows: Vec<RecipeItemRow> = Vec::new();
        let mut portion_rows: Vec<RecipeItemRow> = Vec::new();
        for row in rows {
            match row.kind {
                RecipeItemKind::Base => base_rows.push(row),
                RecipeItemKind::PerPortion => portion_rows.push(row),
            }
        }

        let base_lines: Vec<CostLine> = base_rows.iter().map(row_to_line).collect();
        let portion_lines: Vec<CostLine> = portion_rows.iter().map(row_to_line).collect();
        let costs = calculator::recipe_costs(recipe.portions, &base_lines, &portion_lines);

        for (row, cost) in base_rows.iter().zip(&costs.base_costs) {
            self.recipes.set_item_cost(&row.id, *cost).await?;
        }
        for (row, cost) in portion_rows.iter().zip(&costs.per_portion_costs) {
            self.recipes.set_item_cost(&row.id, *cost).await?;
        }
        self.recipes
            .set_costs(&recipe_id, costs.total_cost, costs.unit_cost)
            .await?;

        // Keep product lines priced by this recipe current, so the product
        // phase only has to re-sum
        let product_items = self.products.items_for_recipe(&recipe_id).await?;
        for item in &product_items {
            let Some(item_id) = &item.id else { continue };
            let cost = calculator::line_cost(item.quantity, costs.unit_cost);
            self.products.set_recipe_item_cost(item_id, cost).await?;
        }

        Ok(costs
            .missing_refs
            .iter()
            .map(|label| {
                format!(
                    "recipe '{}': dangling ingredient reference on {}, priced at zero",
                    recipe.name, label
                )
            })
            .collect())
    }

    /// Refresh one product's line costs and total
    async fn resync_product(&self, product: &Product) -> RepoResult<Vec<String>> {
        let product_id = product
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("product record has no id".to_string()))?;

        let recipe_rows = self.products.recipe_items_with_recipes(&product_id).await?;
        let packaging_rows = self
            .products
            .packaging_items_with_packaging(&product_id)
            .await?;

        let recipe_lines: Vec<CostLine> = recipe_rows
            .iter()
            .map(|row| match &row.recipe {
                Some(recipe) => CostLine::new(recipe.name.clone(), row.quantity, Some(recipe.unit_cost)),
                None => CostLine::new(row.id.to_string(), row.quantity, None),
            })
            .collect();
        let packaging_lines: Vec<CostLine> = packaging_rows
            .iter()
            .map(|row| match &row.packaging {
                Some(packaging) => {
                    CostLine::new(packaging.name.clone(), row.quantity, Some(packaging.unit_cost))
                }
                None => CostLine::new(row.id.to_string(), row.quantity, None),
            })
            .collect();

        let costs = calculator::product_costs(&recipe_lines, &packaging_lines);

        for (row, cost) in recipe_rows.iter().zip(&costs.recipe_costs) {
            self.products.set_recipe_item_cost(&row.id, *cost).await?;
        }
        for (row, cost) in packaging_rows.iter().zip(&costs.packaging_costs) {
            self.products
                .set_packaging_item_cost(&row.id, *cost)
                .await?;
        }
        self.products
            .set_total_cost(&product_id, costs.total_cost)
            .await?;

        Ok(costs
            .missing_refs
            .iter()
            .map(|label| {
                format!(
                    "product '{}': dangling reference on {}, priced at zero",
                    product.name, label
                )
            })
            .collect())
    }

    /// Distinct products owning a line priced by the given recipe
    async fn product_ids_for_recipe(&self, recipe_id: &RecordId) -> RepoResult<Vec<RecordId>> {
        let items = self.products.items_for_recipe(recipe_id).await?;
        let mut seen = std::collections::HashSet::new();
        let mut ids = Vec::new();
        for item in items {
            if seen.insert(item.product.to_string()) {
                ids.push(item.product);
            }
        }
        Ok(ids)
    }
}

fn row_to_line(row: &RecipeItemRow) -> CostLine {
    match &row.ingredient {
        Some(ingredient) => CostLine::new(
            ingredient.name.clone(),
            row.quantity,
            Some(ingredient.unit_cost),
        ),
        None => CostLine::new(row.id.to_string(), row.quantity, None),
    }
}
