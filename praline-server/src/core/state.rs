//! Server State
//!
//! Holds shared references to every service. Cloning is cheap; everything
//! inside is either a handle or behind an `Arc`.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::core::events::EventBus;
use crate::costing::CostSyncService;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded record store
    pub db: Surreal<Db>,
    /// Domain event bus
    pub events: EventBus,
    /// Cost recalculation pipeline
    pub cost_sync: CostSyncService,
}

impl ServerState {
    /// Create the working directory, open the store and wire the services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| AppError::internal(format!("Failed to create {}: {e}", data_dir.display())))?;

        let db_service = DbService::new(&data_dir).await?;
        let events = EventBus::default();
        let cost_sync = CostSyncService::new(db_service.db.clone(), events.clone());

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            events,
            cost_sync,
        })
    }

    /// Publish a record change on the event bus
    pub fn broadcast_change(&self, resource: &str, id: Option<&str>, action: &str) {
        self.events.resource_changed(resource, id, action);
    }
}
