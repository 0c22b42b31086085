//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id};
use crate::db::models::{
    Product, ProductCreate, ProductPackagingItem, ProductPackagingItemCreate,
    ProductPackagingItemUpdate, ProductRecipeItem, ProductRecipeItemCreate,
    ProductRecipeItemUpdate, ProductUpdate, serde_helpers,
};
use crate::utils::validation;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";
const RECIPE_ITEM_TABLE: &str = "product_recipe_item";
const PACKAGING_ITEM_TABLE: &str = "product_packaging_item";

/// Referenced recipe fields needed for costing
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRef {
    pub name: String,
    #[serde(default)]
    pub unit_cost: f64,
}

/// Referenced packaging fields needed for costing
#[derive(Debug, Clone, Deserialize)]
pub struct PackagingRef {
    pub name: String,
    #[serde(default)]
    pub unit_cost: f64,
}

/// Product recipe line with the referenced recipe fetched
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecipeItemRow {
    #[serde(with = "serde_helpers::record_id")]
    pub id: RecordId,
    pub quantity: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub recipe: Option<RecipeRef>,
}

/// Product packaging line with the referenced packaging fetched
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPackagingItemRow {
    #[serde(with = "serde_helpers::record_id")]
    pub id: RecordId,
    pub quantity: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub packaging: Option<PackagingRef>,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self
            .base
            .db()
            .select(make_record_id(PRODUCT_TABLE, id))
            .await?;
        Ok(product)
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        validation::require_name(&data.name, "name")?;
        let sale_price = data.sale_price.unwrap_or(0.0);
        validation::require_amount(sale_price, "sale_price")?;
        self.ensure_name_free(&data.name).await?;

        let product = Product::new(data.name.trim().to_string(), sale_price);
        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let record_id = make_record_id(PRODUCT_TABLE, id);
        let mut product = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        if let Some(name) = data.name {
            validation::require_name(&name, "name")?;
            product.name = name.trim().to_string();
        }
        if let Some(sale_price) = data.sale_price {
            validation::require_amount(sale_price, "sale_price")?;
            product.sale_price = sale_price;
        }
        if let Some(active) = data.is_active {
            product.is_active = active;
        }

        let updated: Option<Product> = self
            .base
            .db()
            .update(record_id)
            .content(product)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product and its own lines
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record_id = make_record_id(PRODUCT_TABLE, id);

        self.base
            .db()
            .query("DELETE product_recipe_item WHERE product = $product")
            .bind(("product", record_id.clone()))
            .await?;
        self.base
            .db()
            .query("DELETE product_packaging_item WHERE product = $product")
            .bind(("product", record_id.clone()))
            .await?;

        let result: Option<Product> = self.base.db().delete(record_id).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    // =========================================================================
    // Recipe lines
    // =========================================================================

    pub async fn add_recipe_item(
        &self,
        product_id: &str,
        data: ProductRecipeItemCreate,
    ) -> RepoResult<ProductRecipeItem> {
        validation::require_quantity(data.quantity, "quantity")?;

        let product = make_record_id(PRODUCT_TABLE, product_id);
        let product_exists: Option<Product> = self.base.db().select(product.clone()).await?;
        if product_exists.is_none() {
            return Err(RepoError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }

        let recipe = make_record_id("recipe", &data.recipe_id);
        let recipe_exists: Option<crate::db::models::Recipe> =
            self.base.db().select(recipe.clone()).await?;
        if recipe_exists.is_none() {
            return Err(RepoError::NotFound(format!(
                "Recipe {} not found",
                data.recipe_id
            )));
        }

        let item = ProductRecipeItem {
            id: None,
            product,
            recipe,
            quantity: data.quantity,
            cost: 0.0,
        };
        let created: Option<ProductRecipeItem> = self
            .base
            .db()
            .create(RECIPE_ITEM_TABLE)
            .content(item)
            .await?;
        created
            .ok_or_else(|| RepoError::Database("Failed to create product recipe item".to_string()))
    }

    pub async fn update_recipe_item(
        &self,
        item_id: &str,
        data: ProductRecipeItemUpdate,
    ) -> RepoResult<ProductRecipeItem> {
        validation::require_quantity(data.quantity, "quantity")?;

        let record_id = make_record_id(RECIPE_ITEM_TABLE, item_id);
        let mut item: ProductRecipeItem = self
            .base
            .db()
            .select(record_id.clone())
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(format!("Product recipe item {} not found", item_id))
            })?;

        item.quantity = data.quantity;

        let updated: Option<ProductRecipeItem> = self
            .base
            .db()
            .update(record_id)
            .content(item)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product recipe item {} not found", item_id)))
    }

    pub async fn remove_recipe_item(&self, item_id: &str) -> RepoResult<()> {
        let result: Option<ProductRecipeItem> = self
            .base
            .db()
            .delete(make_record_id(RECIPE_ITEM_TABLE, item_id))
            .await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!(
                "Product recipe item {} not found",
                item_id
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Packaging lines
    // =========================================================================

    pub async fn add_packaging_item(
        &self,
        product_id: &str,
        data: ProductPackagingItemCreate,
    ) -> RepoResult<ProductPackagingItem> {
        validation::require_quantity(data.quantity, "quantity")?;

        let product = make_record_id(PRODUCT_TABLE, product_id);
        let product_exists: Option<Product> = self.base.db().select(product.clone()).await?;
        if product_exists.is_none() {
            return Err(RepoError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }

        let packaging = make_record_id("packaging", &data.packaging_id);
        let packaging_exists: Option<crate::db::models::Packaging> =
            self.base.db().select(packaging.clone()).await?;
        if packaging_exists.is_none() {
            return Err(RepoError::NotFound(format!(
                "Packaging {} not found",
                data.packaging_id
            )));
        }

        let is_primary = data.is_primary.unwrap_or(false);
        if is_primary {
            // Only one primary packaging per product
            self.base
                .db()
                .query("UPDATE product_packaging_item SET is_primary = false WHERE product = $product")
                .bind(("product", product.clone()))
                .await?;
        }

        let item = ProductPackagingItem {
            id: None,
            product,
            packaging,
            quantity: data.quantity,
            cost: 0.0,
            is_primary,
        };
        let created: Option<ProductPackagingItem> = self
            .base
            .db()
            .create(PACKAGING_ITEM_TABLE)
            .content(item)
            .await?;
        created.ok_or_else(|| {
            RepoError::Database("Failed to create product packaging item".to_string())
        })
    }

    pub async fn update_packaging_item(
        &self,
        item_id: &str,
        data: ProductPackagingItemUpdate,
    ) -> RepoResult<ProductPackagingItem> {
        validation::require_quantity(data.quantity, "quantity")?;

        let record_id = make_record_id(PACKAGING_ITEM_TABLE, item_id);
        let mut item: ProductPackagingItem = self
            .base
            .db()
            .select(record_id.clone())
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(format!("Product packaging item {} not found", item_id))
            })?;

        item.quantity = data.quantity;

        let updated: Option<ProductPackagingItem> = self
            .base
            .db()
            .update(record_id)
            .content(item)
            .await?;
        updated.ok_or_else(|| {
            RepoError::NotFound(format!("Product packaging item {} not found", item_id))
        })
    }

    pub async fn remove_packaging_item(&self, item_id: &str) -> RepoResult<()> {
        let result: Option<ProductPackagingItem> = self
            .base
            .db()
            .delete(make_record_id(PACKAGING_ITEM_TABLE, item_id))
            .await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!(
                "Product packaging item {} not found",
                item_id
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Costing reads
    // =========================================================================

    /// Recipe lines of a product with the referenced recipe fetched
    pub async fn recipe_items_with_recipes(
        &self,
        product_id: &RecordId,
    ) -> RepoResult<Vec<ProductRecipeItemRow>> {
        let rows: Vec<ProductRecipeItemRow> = self
            .base
            .db()
            .query("SELECT * FROM product_recipe_item WHERE product = $product FETCH recipe")
            .bind(("product", product_id.clone()))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Packaging lines of a product with the referenced packaging fetched
    pub async fn packaging_items_with_packaging(
        &self,
        product_id: &RecordId,
    ) -> RepoResult<Vec<ProductPackagingItemRow>> {
        let rows: Vec<ProductPackagingItemRow> = self
            .base
            .db()
            .query("SELECT * FROM product_packaging_item WHERE product = $product FETCH packaging")
            .bind(("product", product_id.clone()))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Every product recipe line priced by the given recipe
    pub async fn items_for_recipe(
        &self,
        recipe_id: &RecordId,
    ) -> RepoResult<Vec<ProductRecipeItem>> {
        let items: Vec<ProductRecipeItem> = self
            .base
            .db()
            .query("SELECT * FROM product_recipe_item WHERE recipe = $recipe")
            .bind(("recipe", recipe_id.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    // =========================================================================
    // Derived-cost writes (used by the costing pipeline only)
    // =========================================================================

    pub async fn set_recipe_item_cost(&self, item_id: &RecordId, cost: f64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $item SET cost = $cost")
            .bind(("item", item_id.clone()))
            .bind(("cost", cost))
            .await?;
        Ok(())
    }

    pub async fn set_packaging_item_cost(&self, item_id: &RecordId, cost: f64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $item SET cost = $cost")
            .bind(("item", item_id.clone()))
            .bind(("cost", cost))
            .await?;
        Ok(())
    }

    pub async fn set_total_cost(&self, product_id: &RecordId, total_cost: f64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $product SET total_cost = $total_cost")
            .bind(("product", product_id.clone()))
            .bind(("total_cost", total_cost))
            .await?;
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str) -> RepoResult<()> {
        let name = name.trim().to_string();
        let existing: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE name = $name AND is_active = true LIMIT 1")
            .bind(("name", name.clone()))
            .await?
            .take(0)?;
        if existing.is_empty() {
            Ok(())
        } else {
            Err(RepoError::Duplicate(format!(
                "Product '{}' already exists",
                name
            )))
        }
    }
}
