//! Praline - back office for small confectionery businesses
//!
//! # Overview
//!
//! - **Catalog** (`db`): ingredients, packaging, recipes, products and
//!   their lines in an embedded record store
//! - **Costing** (`costing`): derived-cost recalculation through the
//!   ingredient → recipe → product chain, plus the full-system sync
//! - **Orders** (`db`, `api`): customer orders with status transitions,
//!   accounts payable, resellers
//! - **HTTP API** (`api`): RESTful surface for the browser front end
//! - **Events** (`core::events`): change notifications for dependents
//!
//! # Module structure
//!
//! ```text
//! praline-server/src/
//! ├── core/          # config, state, events, HTTP server
//! ├── db/            # store bootstrap, models, repositories
//! ├── costing/       # calculator + sync pipeline
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod costing;
pub mod db;
pub mod utils;

// Re-export common types
pub use crate::core::{Config, DomainEvent, EventBus, Server, ServerState};
pub use costing::{CostSyncService, SyncReport};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
                   ___
    ___  _______ _/ (_)__  ___
   / _ \/ __/ _ `/ / / _ \/ -_)
  / .__/_/  \_,_/_/_/_//_/\__/
 /_/
    "#
    );
}
