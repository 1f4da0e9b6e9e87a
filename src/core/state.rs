use std::sync::Arc;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Shared server state
///
/// Holds the configuration, the embedded database handle and the JWT
/// service. Clones are shallow; every handler receives one through the
/// axum `State` extractor.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize state for production use: ensure the data directory
    /// exists and open the on-disk database.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(config.data_dir())?;

        let db = DbService::open(&config.data_dir()).await?;

        Ok(Self::new(
            config.clone(),
            db,
            Arc::new(JwtService::with_config(config.jwt.clone())),
        ))
    }

    /// Build state around an existing database handle. Integration
    /// tests use this with an in-memory engine.
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self::new(config, db, jwt_service)
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
