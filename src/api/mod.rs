//! API route modules
//!
//! Each module exposes a `router()` over [`ServerState`]:
//!
//! - [`health`] - liveness check
//! - [`tenants`] - registration and login
//! - [`tables`] - dining table management and QR lookup
//! - [`orders`] - guest ordering, staff workflow, revenue stats
//! - [`bookings`] - reservations
//! - [`waiter_calls`] - table service alerts
//! - [`kitchen`] - kitchen display polling view
//! - [`staff`] - floor staff polling view
//!
//! Routes under `/api/public/` are unauthenticated and addressed by
//! restaurant slug; everything else requires a tenant Bearer token.

pub mod bookings;
pub mod health;
pub mod kitchen;
pub mod orders;
pub mod staff;
pub mod tables;
pub mod tenants;
pub mod waiter_calls;

pub use crate::utils::{AppResponse, AppResult};
