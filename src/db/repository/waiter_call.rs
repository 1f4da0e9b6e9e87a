//! Waiter Call Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{WaiterCall, WaiterCallStatus};

const TABLE: &str = "waiter_call";

#[derive(Clone)]
pub struct WaiterCallRepository {
    base: BaseRepository,
}

impl WaiterCallRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Record a call. Never de-duplicated: repeated calls from the same
    /// table are separate actionable items.
    pub async fn create(&self, call: WaiterCall) -> RepoResult<WaiterCall> {
        let created: Option<WaiterCall> = self.base.db().create(TABLE).content(call).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create waiter call".to_string()))
    }

    /// Calls of a tenant, newest first, optionally restricted by status
    pub async fn find_all(
        &self,
        tenant: &RecordId,
        status: Option<WaiterCallStatus>,
    ) -> RepoResult<Vec<WaiterCall>> {
        let calls: Vec<WaiterCall> = match status {
            Some(status) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM waiter_call WHERE tenant = $tenant AND status = $status \
                         ORDER BY created_at DESC",
                    )
                    .bind(("tenant", tenant.clone()))
                    .bind(("status", status))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM waiter_call WHERE tenant = $tenant \
                         ORDER BY created_at DESC",
                    )
                    .bind(("tenant", tenant.clone()))
                    .await?
                    .take(0)?
            }
        };
        Ok(calls)
    }

    /// Acknowledge a call. Idempotent: acknowledging an already
    /// acknowledged call succeeds without change.
    pub async fn acknowledge(&self, tenant: &RecordId, id: &str) -> RepoResult<WaiterCall> {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Waiter call {} not found", id)))?;

        let updated: Vec<WaiterCall> = self
            .base
            .db()
            .query(
                "UPDATE waiter_call SET status = $acknowledged \
                 WHERE id = $id AND tenant = $tenant RETURN AFTER",
            )
            .bind(("id", rid))
            .bind(("tenant", tenant.clone()))
            .bind(("acknowledged", WaiterCallStatus::Acknowledged))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Waiter call {} not found", id)))
    }
}
