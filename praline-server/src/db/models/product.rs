//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product model: a sellable item assembled from recipe portions plus
/// packaging
///
/// `total_cost` is derived as a flat sum over the item lines; there is no
/// yield concept at this level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Selling price set by the owner
    #[serde(default)]
    pub sale_price: f64,
    /// Derived: recipe item costs + packaging item costs
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    pub fn new(name: String, sale_price: f64) -> Self {
        Self {
            id: None,
            name,
            sale_price,
            total_cost: 0.0,
            is_active: true,
        }
    }
}

/// Recipe portion line of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecipeItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub recipe: RecordId,
    /// Portions of the recipe this product consumes
    pub quantity: f64,
    /// Derived: quantity * recipe unit cost
    #[serde(default)]
    pub cost: f64,
}

/// Packaging line of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPackagingItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub packaging: RecordId,
    pub quantity: f64,
    /// Derived: quantity * packaging unit cost
    #[serde(default)]
    pub cost: f64,
    /// Marks the packaging shown by default in listings
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub sale_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecipeItemCreate {
    /// Recipe id, "recipe:xxx" or bare
    pub recipe_id: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecipeItemUpdate {
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPackagingItemCreate {
    /// Packaging id, "packaging:xxx" or bare
    pub packaging_id: String,
    pub quantity: f64,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPackagingItemUpdate {
    pub quantity: f64,
}
