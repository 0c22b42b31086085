//! Database Module
//!
//! Embedded record store: connection bootstrap and table definitions.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service that owns the embedded store handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the store under `data_dir` and define the schema
    pub async fn new(data_dir: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(data_dir.to_path_buf())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("praline")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database ready at {}", data_dir.display());
        Ok(Self { db })
    }
}

/// Define all tables up front so the data model is visible in one place.
///
/// Tables stay schemaless; the typed models in [`models`] are the contract.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    const SCHEMA: &str = "
        DEFINE TABLE IF NOT EXISTS ingredient SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS packaging SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS recipe SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS recipe_item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS product_recipe_item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS product_packaging_item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS customer_order SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS payable SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS reseller SCHEMALESS;
    ";

    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
