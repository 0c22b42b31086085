//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`ingredients`] - ingredient management
//! - [`packaging`] - packaging management
//! - [`recipes`] - recipe and recipe line management
//! - [`products`] - product and product line management
//! - [`orders`] - order management and status transitions
//! - [`payables`] - accounts payable
//! - [`resellers`] - reseller management
//! - [`costing`] - full-system cost synchronization
//! - [`reports`] - dashboard and margin reports

pub mod costing;
pub mod health;
pub mod ingredients;
pub mod orders;
pub mod packaging;
pub mod payables;
pub mod products;
pub mod recipes;
pub mod reports;
pub mod resellers;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(ingredients::router())
        .merge(packaging::router())
        .merge(recipes::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(payables::router())
        .merge(resellers::router())
        .merge(costing::router())
        .merge(reports::router())
}

/// Build the fully configured application with all middleware
pub fn build_app(_state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS - the browser front end lives on another origin
        .layer(CorsLayer::permissive())
        // Compression - gzip responses
        .layer(CompressionLayer::new())
        // Trace - request logging at INFO level
        .layer(TraceLayer::new_for_http())
        // Request ID - unique ID per request, propagated to the response
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
