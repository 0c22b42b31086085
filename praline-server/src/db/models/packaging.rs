//! Packaging Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Packaging model (boxes, ribbons, wrappers)
///
/// Unit cost derivation mirrors ingredients: `bulk_price / bulk_quantity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packaging {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Units contained in one bulk purchase
    pub bulk_quantity: f64,
    /// Price of one bulk purchase
    pub bulk_price: f64,
    /// Derived: cost of a single unit
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Packaging {
    pub fn new(name: String, bulk_quantity: f64, bulk_price: f64, unit_cost: f64) -> Self {
        Self {
            id: None,
            name,
            bulk_quantity,
            bulk_price,
            unit_cost,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingCreate {
    pub name: String,
    pub bulk_quantity: f64,
    pub bulk_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
