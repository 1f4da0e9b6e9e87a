//! Repository Module
//!
//! CRUD and conditional-update access to the SurrealDB tables. Every
//! query that touches tenant-owned data binds the tenant record id —
//! an entity of another tenant is indistinguishable from an absent one.

// Tenancy
pub mod tenant;

// Location
pub mod dining_table;

// Orders
pub mod order;

// Bookings
pub mod booking;

// Waiter calls
pub mod waiter_call;

// Re-exports
pub use booking::BookingRepository;
pub use dining_table::DiningTableRepository;
pub use order::OrderRepository;
pub use tenant::TenantRepository;
pub use waiter_call::WaiterCallRepository;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;
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

    #[error("Invalid status transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

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
