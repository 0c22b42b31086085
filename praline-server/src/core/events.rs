//! Domain Events
//!
//! In-process broadcast bus that tells dependents (UI caches, listeners)
//! when records change and when a cost synchronization completes. Each
//! resource carries a monotonically increasing version so subscribers can
//! tell stale notifications from fresh ones.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::costing::SyncReport;

/// Per-resource version counters
///
/// Lock-free concurrent map; every change to a resource type bumps its
/// counter atomically.
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Increment the version of a resource and return the new value
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version of a resource, 0 if never changed
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// Events published on the bus
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A record was created, updated or deleted
    ResourceChanged {
        resource: String,
        id: Option<String>,
        action: String,
        version: u64,
    },
    /// A full cost synchronization finished
    CostsSynced {
        updated_recipes: usize,
        updated_products: usize,
        error_count: usize,
    },
}

/// Broadcast bus for domain events
///
/// Cheap to clone; publishing with no subscribers is a no-op.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
    versions: Arc<ResourceVersions>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            versions: Arc::new(ResourceVersions::new()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    /// Publish a record change, stamping the next resource version
    pub fn resource_changed(&self, resource: &str, id: Option<&str>, action: &str) {
        let version = self.versions.increment(resource);
        let _ = self.tx.send(DomainEvent::ResourceChanged {
            resource: resource.to_string(),
            id: id.map(|s| s.to_string()),
            action: action.to_string(),
            version,
        });
    }

    /// Publish the completion of a cost synchronization
    pub fn costs_synced(&self, report: &SyncReport) {
        let _ = self.tx.send(DomainEvent::CostsSynced {
            updated_recipes: report.updated_recipes,
            updated_products: report.updated_products,
            error_count: report.errors.len(),
        });
    }

    pub fn version_of(&self, resource: &str) -> u64 {
        self.versions.get(resource)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_increment_per_resource() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("recipe"), 0);
        assert_eq!(versions.increment("recipe"), 1);
        assert_eq!(versions.increment("recipe"), 2);
        assert_eq!(versions.increment("product"), 1);
        assert_eq!(versions.get("recipe"), 2);
    }

    #[tokio::test]
    async fn subscribers_receive_changes() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.resource_changed("ingredient", Some("ingredient:abc"), "updated");

        match rx.recv().await.unwrap() {
            DomainEvent::ResourceChanged {
                resource,
                id,
                action,
                version,
            } => {
                assert_eq!(resource, "ingredient");
                assert_eq!(id.as_deref(), Some("ingredient:abc"));
                assert_eq!(action, "updated");
                assert_eq!(version, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let bus = EventBus::new(8);
        bus.resource_changed("recipe", None, "created");
    }

    #[test]
    fn events_serialize_with_a_type_tag() {
        let event = DomainEvent::CostsSynced {
            updated_recipes: 3,
            updated_products: 5,
            error_count: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "costs_synced");
        assert_eq!(json["updated_recipes"], 3);
        assert_eq!(json["updated_products"], 5);
    }
}
