//! Repository Module
//!
//! CRUD access to the record store, one repository per table. Relationship
//! reads use record links and `FETCH` so rows come back with the referenced
//! record's current fields in one round trip.

pub mod ingredient;
pub mod order;
pub mod packaging;
pub mod payable;
pub mod product;
pub mod recipe;
pub mod reseller;

// Re-exports
pub use ingredient::IngredientRepository;
pub use order::OrderRepository;
pub use packaging::PackagingRepository;
pub use payable::PayableRepository;
pub use product::ProductRepository;
pub use recipe::RecipeRepository;
pub use reseller::ResellerRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a RecordId from either a bare key or a "table:key" string.
///
/// A prefix naming a different table is kept as part of the key rather than
/// silently re-targeted.
pub fn make_record_id(table: &str, id: &str) -> RecordId {
    match id.split_once(':') {
        Some((prefix, key)) if prefix == table => RecordId::from_table_key(table, key),
        _ => RecordId::from_table_key(table, id),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_both_forms() {
        let bare = make_record_id("recipe", "abc");
        let prefixed = make_record_id("recipe", "recipe:abc");
        assert_eq!(bare, prefixed);
        assert_eq!(bare.table(), "recipe");
    }

    #[test]
    fn foreign_prefix_is_not_retargeted() {
        let id = make_record_id("recipe", "product:abc");
        assert_eq!(id.table(), "recipe");
    }
}
