//! Tenant Model
//!
//! One restaurant account — the unit of data isolation. Every other
//! entity carries a tenant record id; no cross-tenant visibility exists.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Tenant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Public URL-safe identifier, immutable after registration
    pub slug: String,
    /// Restaurant display name
    pub name: String,
    pub email: String,
    /// Argon2 hash, never serialized to API responses
    pub password_hash: String,
    /// ISO currency code used for display, e.g. "EUR"
    pub currency: String,
    pub created_at: i64,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TenantRegister {
    #[validate(length(min = 2, max = 64))]
    pub slug: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub currency: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct TenantLogin {
    pub email: String,
    pub password: String,
}

/// Tenant data safe to return to clients (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantResponse {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub currency: String,
}

impl From<&Tenant> for TenantResponse {
    fn from(t: &Tenant) -> Self {
        Self {
            id: t.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            slug: t.slug.clone(),
            name: t.name.clone(),
            currency: t.currency.clone(),
        }
    }
}

/// Slugs are lowercase letters, digits and hyphens only
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_format() {
        assert!(is_valid_slug("golden-dragon"));
        assert!(is_valid_slug("cafe42"));
        assert!(!is_valid_slug("Golden Dragon"));
        assert!(!is_valid_slug("café"));
        assert!(!is_valid_slug(""));
    }
}
