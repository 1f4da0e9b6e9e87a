//! Order Repository
//!
//! Orders are append-only: creation writes one record with all lines
//! embedded (atomic materialization), and the only mutation afterwards
//! is a conditional status update. There is no delete.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderStatus};

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a materialized order (status pending, lines embedded)
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Orders of a tenant, newest first, optionally restricted to a
    /// status set
    pub async fn find_all(
        &self,
        tenant: &RecordId,
        statuses: Option<Vec<OrderStatus>>,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = match statuses {
            Some(statuses) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM orders WHERE tenant = $tenant AND status IN $statuses \
                         ORDER BY created_at DESC",
                    )
                    .bind(("tenant", tenant.clone()))
                    .bind(("statuses", statuses))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM orders WHERE tenant = $tenant ORDER BY created_at DESC",
                    )
                    .bind(("tenant", tenant.clone()))
                    .await?
                    .take(0)?
            }
        };
        Ok(orders)
    }

    /// Find an order by id, scoped to the tenant
    pub async fn find_by_id(&self, tenant: &RecordId, id: &str) -> RepoResult<Option<Order>> {
        let Ok(rid) = id.parse::<RecordId>() else {
            return Ok(None);
        };
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE id = $id AND tenant = $tenant")
            .bind(("id", rid))
            .bind(("tenant", tenant.clone()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Command the order to `target` status.
    ///
    /// A single conditional update serializes concurrent devices: the
    /// write applies only when the current status is a valid source of
    /// `target` (or already `target`, which absorbs duplicate retries
    /// as a no-op). When the condition matches nothing, the order is
    /// re-read to tell `NotFound` apart from `InvalidTransition`.
    pub async fn set_status(
        &self,
        tenant: &RecordId,
        id: &str,
        target: OrderStatus,
    ) -> RepoResult<Order> {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Order {} not found", id)))?;
        let sources = OrderStatus::valid_sources(target);

        let updated: Vec<Order> = self
            .base
            .db()
            .query(
                "UPDATE orders SET status = $target \
                 WHERE id = $id AND tenant = $tenant \
                 AND (status = $target OR status IN $sources) \
                 RETURN AFTER",
            )
            .bind(("id", rid))
            .bind(("tenant", tenant.clone()))
            .bind(("target", target))
            .bind(("sources", sources))
            .await?
            .take(0)?;

        if let Some(order) = updated.into_iter().next() {
            return Ok(order);
        }

        let current = self
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;
        if current.status == target {
            // A concurrent command won the race with the same target.
            return Ok(current);
        }
        Err(RepoError::InvalidTransition {
            from: current.status.to_string(),
            to: target.to_string(),
        })
    }

    /// All non-cancelled orders of a tenant (revenue projection input)
    pub async fn find_non_cancelled(&self, tenant: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE tenant = $tenant AND status != $cancelled")
            .bind(("tenant", tenant.clone()))
            .bind(("cancelled", OrderStatus::Cancelled))
            .await?
            .take(0)?;
        Ok(orders)
    }
}
