//! Ingredient Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Ingredient model
///
/// `unit_cost` is derived from the purchased package
/// (`package_price / package_quantity`) and recomputed on every edit of the
/// package fields. It is the root of the cost dependency chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Smallest usable unit, e.g. "g", "ml", "un"
    pub unit: String,
    /// How much of `unit` one purchased package contains
    pub package_quantity: f64,
    /// Price of one purchased package
    pub package_price: f64,
    /// Derived: cost of one `unit`
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Ingredient {
    pub fn new(
        name: String,
        unit: String,
        package_quantity: f64,
        package_price: f64,
        unit_cost: f64,
    ) -> Self {
        Self {
            id: None,
            name,
            unit,
            package_quantity,
            package_price,
            unit_cost,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub unit: String,
    pub package_quantity: f64,
    pub package_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
