//! Database Module
//!
//! Embedded SurrealDB: RocksDB-backed on disk for the server, in-memory
//! for tests.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::engine::local::{Db, Mem, RocksDb};
use surrealdb::Surreal;

use crate::utils::AppError;

const NAMESPACE: &str = "comanda";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
pub struct DbService;

impl DbService {
    /// Open the on-disk database under `data_dir`
    pub async fn open(data_dir: &Path) -> Result<Surreal<Db>, AppError> {
        let path = data_dir.join("comanda.db");
        let db = Surreal::new::<RocksDb>(path.to_string_lossy().to_string())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        tracing::info!(path = %path.display(), "Database connection established");
        Ok(db)
    }

    /// Open an in-memory database (tests)
    pub async fn memory() -> Result<Surreal<Db>, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;
        Ok(db)
    }
}
