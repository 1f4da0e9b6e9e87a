//! Dining Table Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Dining table entity, owned by exactly one tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub tenant: RecordId,
    /// Unique within the tenant, not globally
    pub number: i32,
    /// Optional display name, e.g. "Terrace 2"
    pub name: Option<String>,
    pub created_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[validate(range(min = 1))]
    pub number: i32,
    pub name: Option<String>,
}

/// Public view of a table (QR landing page lookup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTablePublic {
    pub id: String,
    pub number: i32,
    pub name: Option<String>,
}

impl From<&DiningTable> for DiningTablePublic {
    fn from(t: &DiningTable) -> Self {
        Self {
            id: t.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            number: t.number,
            name: t.name.clone(),
        }
    }
}
