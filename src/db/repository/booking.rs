//! Booking Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Booking, BookingStatus};

const TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, booking: Booking) -> RepoResult<Booking> {
        let created: Option<Booking> = self.base.db().create(TABLE).content(booking).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// Bookings of a tenant with optional date/status filters, ordered
    /// by date then time
    pub async fn find_all(
        &self,
        tenant: &RecordId,
        date: Option<String>,
        status: Option<BookingStatus>,
    ) -> RepoResult<Vec<Booking>> {
        let mut sql = String::from("SELECT * FROM booking WHERE tenant = $tenant");
        if date.is_some() {
            sql.push_str(" AND date = $date");
        }
        if status.is_some() {
            sql.push_str(" AND status = $status");
        }
        sql.push_str(" ORDER BY date, time");

        let mut query = self.base.db().query(sql).bind(("tenant", tenant.clone()));
        if let Some(date) = date {
            query = query.bind(("date", date));
        }
        if let Some(status) = status {
            query = query.bind(("status", status));
        }

        let bookings: Vec<Booking> = query.await?.take(0)?;
        Ok(bookings)
    }

    /// Today's workable bookings (pending or confirmed), earliest first
    pub async fn find_active_for_date(
        &self,
        tenant: &RecordId,
        date: &str,
    ) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking WHERE tenant = $tenant AND date = $date \
                 AND status IN $statuses ORDER BY time",
            )
            .bind(("tenant", tenant.clone()))
            .bind(("date", date.to_string()))
            .bind(("statuses", vec![BookingStatus::Pending, BookingStatus::Confirmed]))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    pub async fn find_by_id(&self, tenant: &RecordId, id: &str) -> RepoResult<Option<Booking>> {
        let Ok(rid) = id.parse::<RecordId>() else {
            return Ok(None);
        };
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE id = $id AND tenant = $tenant")
            .bind(("id", rid))
            .bind(("tenant", tenant.clone()))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    /// Conditional status update, same contract as order transitions:
    /// same-target no-ops, illegal targets fail with the current status
    pub async fn set_status(
        &self,
        tenant: &RecordId,
        id: &str,
        target: BookingStatus,
    ) -> RepoResult<Booking> {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Booking {} not found", id)))?;
        let sources = BookingStatus::valid_sources(target);

        let updated: Vec<Booking> = self
            .base
            .db()
            .query(
                "UPDATE booking SET status = $target \
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

        if let Some(booking) = updated.into_iter().next() {
            return Ok(booking);
        }

        let current = self
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))?;
        if current.status == target {
            return Ok(current);
        }
        Err(RepoError::InvalidTransition {
            from: current.status.to_string(),
            to: target.to_string(),
        })
    }

    /// Hard delete regardless of status, scoped to the tenant
    pub async fn delete(&self, tenant: &RecordId, id: &str) -> RepoResult<()> {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Booking {} not found", id)))?;
        let deleted: Vec<Booking> = self
            .base
            .db()
            .query("DELETE booking WHERE id = $id AND tenant = $tenant RETURN BEFORE")
            .bind(("id", rid))
            .bind(("tenant", tenant.clone()))
            .await?
            .take(0)?;
        if deleted.is_empty() {
            return Err(RepoError::NotFound(format!("Booking {} not found", id)));
        }
        Ok(())
    }
}
