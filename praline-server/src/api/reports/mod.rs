//! Reports API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reports/dashboard", get(handler::dashboard))
        .route("/api/reports/margins", get(handler::margins))
}
