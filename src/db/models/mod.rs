//! Database Models

// Serde helpers
pub mod serde_helpers;

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
pub use booking::{Booking, BookingCreate, BookingSetStatus, BookingStatus};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTablePublic};
pub use order::{Order, OrderLine, OrderSetStatus, OrderStats, OrderStatus, RevenueBucket};
pub use tenant::{is_valid_slug, Tenant, TenantLogin, TenantRegister, TenantResponse};
pub use waiter_call::{WaiterCall, WaiterCallCreate, WaiterCallStatus};
