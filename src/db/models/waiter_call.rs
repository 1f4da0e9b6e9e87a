//! Waiter Call Model
//!
//! A transient service-request alert from a table. Creation is
//! unauthenticated and never de-duplicated — repeated calls signal
//! urgency, and staff see each one as a separate actionable item.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Waiter call status: `pending → acknowledged`, terminal at acknowledged
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaiterCallStatus {
    Pending,
    Acknowledged,
}

/// Waiter call entity
///
/// Acknowledged calls are excluded from active views but retained for
/// audit; nothing deletes them programmatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaiterCall {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub tenant: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    /// Table number snapshot at call time
    pub table_number: i32,
    pub status: WaiterCallStatus,
    pub created_at: i64,
}

/// Public waiter call creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct WaiterCallCreate {
    pub table_id: String,
}
