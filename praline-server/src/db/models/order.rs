//! Order Model

use super::serde_helpers;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order lifecycle status
///
/// Moves forward along the chain only; `Cancelled` is reachable from any
/// non-final status. `Delivered` and `Cancelled` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InProduction,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether a transition from `self` to `next` is allowed
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (Pending, Confirmed)
            | (Confirmed, InProduction)
            | (InProduction, Ready)
            | (Ready, Delivered) => true,
            (Pending | Confirmed | InProduction | Ready, Cancelled) => true,
            _ => false,
        }
    }

    /// Final statuses accept no further transitions
    pub fn is_final(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// One line of an order
///
/// Name and unit price are snapshots taken when the order is created, so a
/// later price change does not rewrite past orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Order model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub customer_name: String,
    /// Optional reseller who brokered the sale
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub reseller: Option<RecordId>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Derived at creation: sum of quantity * unit_price over the items
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Product id, "product:xxx" or bare
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    /// Reseller id, "reseller:xxx" or bare
    pub reseller_id: Option<String>,
    pub items: Vec<OrderItemInput>,
    pub notes: Option<String>,
    pub delivery_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_chain_is_allowed() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(InProduction));
        assert!(InProduction.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Delivered));
    }

    #[test]
    fn skipping_and_reversing_are_rejected() {
        use OrderStatus::*;
        assert!(!Pending.can_transition_to(Ready));
        assert!(!Ready.can_transition_to(Confirmed));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn cancel_only_before_final() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Ready.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn final_statuses() {
        assert!(OrderStatus::Delivered.is_final());
        assert!(OrderStatus::Cancelled.is_final());
        assert!(!OrderStatus::Ready.is_final());
    }
}
