//! Dining Table Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All tables of a tenant, ordered by table number
    pub async fn find_all(&self, tenant: &RecordId) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE tenant = $tenant ORDER BY number")
            .bind(("tenant", tenant.clone()))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find a table by id, scoped to the tenant
    pub async fn find_by_id(&self, tenant: &RecordId, id: &str) -> RepoResult<Option<DiningTable>> {
        let Ok(rid) = id.parse::<RecordId>() else {
            return Ok(None);
        };
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE id = $id AND tenant = $tenant")
            .bind(("id", rid))
            .bind(("tenant", tenant.clone()))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    pub async fn find_by_number(
        &self,
        tenant: &RecordId,
        number: i32,
    ) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE tenant = $tenant AND number = $number LIMIT 1")
            .bind(("tenant", tenant.clone()))
            .bind(("number", number))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a table; numbers are unique within a tenant
    pub async fn create(
        &self,
        tenant: &RecordId,
        data: DiningTableCreate,
    ) -> RepoResult<DiningTable> {
        if self.find_by_number(tenant, data.number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already exists",
                data.number
            )));
        }

        let table = DiningTable {
            id: None,
            tenant: tenant.clone(),
            number: data.number,
            name: data.name,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Hard delete, scoped to the tenant
    pub async fn delete(&self, tenant: &RecordId, id: &str) -> RepoResult<()> {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Table {} not found", id)))?;
        let deleted: Vec<DiningTable> = self
            .base
            .db()
            .query("DELETE dining_table WHERE id = $id AND tenant = $tenant RETURN BEFORE")
            .bind(("id", rid))
            .bind(("tenant", tenant.clone()))
            .await?
            .take(0)?;
        if deleted.is_empty() {
            return Err(RepoError::NotFound(format!("Table {} not found", id)));
        }
        Ok(())
    }
}
