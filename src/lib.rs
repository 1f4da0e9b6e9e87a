//! Comanda - multi-tenant restaurant ordering backend
//!
//! Guests scan a table QR code, browse and order without an account;
//! each restaurant is an isolated tenant identified by a public slug.
//!
//! # Module layout
//!
//! ```text
//! src/
//! ├── core/     # configuration, shared state, HTTP server
//! ├── auth/     # JWT sessions, tenant extractor
//! ├── api/      # routes and handlers
//! ├── cart.rs   # guest cart accumulation and materialization
//! ├── db/       # embedded SurrealDB models and repositories
//! └── utils/    # errors, logging, time windows
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod core;
pub mod db;
pub mod utils;

pub use auth::{CurrentTenant, JwtService};
pub use core::{build_app, build_router, Config, Server, ServerState};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResponse, AppResult};
