//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error types
//! - [`logger`] - tracing setup
//! - [`time`] - revenue window boundaries

pub mod error;
pub mod logger;
pub mod time;

pub use error::{ok, AppError, AppResponse, AppResult};
