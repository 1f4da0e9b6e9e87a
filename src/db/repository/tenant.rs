//! Tenant Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Tenant;

const TABLE: &str = "tenant";

#[derive(Clone)]
pub struct TenantRepository {
    base: BaseRepository,
}

impl TenantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Resolve a public slug to a tenant
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Tenant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM tenant WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let tenants: Vec<Tenant> = result.take(0)?;
        Ok(tenants.into_iter().next())
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Tenant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM tenant WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let tenants: Vec<Tenant> = result.take(0)?;
        Ok(tenants.into_iter().next())
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Tenant>> {
        let tenant: Option<Tenant> = self.base.db().select(id.clone()).await?;
        Ok(tenant)
    }

    /// Register a new tenant; slug and email must both be free
    pub async fn create(&self, tenant: Tenant) -> RepoResult<Tenant> {
        if self.find_by_slug(&tenant.slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Slug '{}' is already taken",
                tenant.slug
            )));
        }
        if self.find_by_email(&tenant.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already in use",
                tenant.email
            )));
        }

        let created: Option<Tenant> = self.base.db().create(TABLE).content(tenant).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create tenant".to_string()))
    }
}
