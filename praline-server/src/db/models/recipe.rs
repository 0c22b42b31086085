//! Recipe Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// How a recipe consumes an ingredient line
///
/// Base lines are spent once per batch no matter the yield (shared batter);
/// per-portion lines are spent once per produced portion (topping per slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeItemKind {
    Base,
    PerPortion,
}

/// Recipe model
///
/// `total_cost` and `unit_cost` are derived from the item lines and the
/// yield; see the costing module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Portions one batch yields
    pub portions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Derived: cost of one full batch
    #[serde(default)]
    pub total_cost: f64,
    /// Derived: cost of one portion
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Recipe {
    pub fn new(name: String, portions: i64, notes: Option<String>) -> Self {
        Self {
            id: None,
            name,
            portions,
            notes,
            total_cost: 0.0,
            unit_cost: 0.0,
            is_active: true,
        }
    }
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Record link to the owning recipe
    #[serde(with = "serde_helpers::record_id")]
    pub recipe: RecordId,
    /// Record link to the consumed ingredient
    #[serde(with = "serde_helpers::record_id")]
    pub ingredient: RecordId,
    pub kind: RecipeItemKind,
    /// Quantity in the ingredient's unit
    pub quantity: f64,
    /// Derived: quantity * ingredient unit cost
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    pub portions: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeItemCreate {
    /// Ingredient id, "ingredient:xxx" or bare
    pub ingredient_id: String,
    pub kind: RecipeItemKind,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeItemUpdate {
    pub quantity: f64,
}
