//! Core module - configuration, state, events and the HTTP server

pub mod config;
pub mod events;
pub mod server;
pub mod state;

pub use config::Config;
pub use events::{DomainEvent, EventBus};
pub use server::Server;
pub use state::ServerState;
