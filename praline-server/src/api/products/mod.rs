//! Product API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/recalculate", post(handler::recalculate))
        // Recipe line routes
        .route("/{id}/recipe-items", post(handler::add_recipe_item))
        .route(
            "/{id}/recipe-items/{item_id}",
            put(handler::update_recipe_item).delete(handler::remove_recipe_item),
        )
        // Packaging line routes
        .route("/{id}/packaging-items", post(handler::add_packaging_item))
        .route(
            "/{id}/packaging-items/{item_id}",
            put(handler::update_packaging_item).delete(handler::remove_packaging_item),
        )
}
