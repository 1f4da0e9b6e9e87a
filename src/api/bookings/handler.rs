//! Booking API Handlers

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentTenant;
use crate::core::ServerState;
use crate::db::models::{Booking, BookingCreate, BookingSetStatus, BookingStatus};
use crate::db::repository::{BookingRepository, TenantRepository};
use crate::utils::{time, AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub date: Option<String>,
    pub status: Option<String>,
}

/// POST /api/public/bookings/{slug}
pub async fn submit(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    if !time::is_valid_date(&payload.date) {
        return Err(AppError::validation("Date must be YYYY-MM-DD"));
    }
    if !time::is_valid_time(&payload.time) {
        return Err(AppError::validation("Time must be HH:MM"));
    }

    let tenant = TenantRepository::new(state.db.clone())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    let tenant_id = tenant
        .id
        .ok_or_else(|| AppError::internal("Tenant record has no id"))?;

    let booking = Booking {
        id: None,
        tenant: tenant_id,
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        guests: payload.guests,
        date: payload.date,
        time: payload.time,
        note: payload.note,
        status: BookingStatus::Pending,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let created = BookingRepository::new(state.db.clone())
        .create(booking)
        .await?;
    Ok(Json(created))
}

/// GET /api/bookings?date=YYYY-MM-DD&status=pending
pub async fn list(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    if let Some(date) = query.date.as_deref() {
        if !time::is_valid_date(date) {
            return Err(AppError::validation("Date must be YYYY-MM-DD"));
        }
    }
    let status = match query.status.as_deref() {
        Some(raw) => Some(BookingStatus::from_str(raw).map_err(AppError::validation)?),
        None => None,
    };

    let bookings = BookingRepository::new(state.db.clone())
        .find_all(&tenant.id, query.date, status)
        .await?;
    Ok(Json(bookings))
}

/// PUT /api/bookings/{id}/status
pub async fn set_status(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
    Path(id): Path<String>,
    Json(payload): Json<BookingSetStatus>,
) -> AppResult<Json<Booking>> {
    let booking = BookingRepository::new(state.db.clone())
        .set_status(&tenant.id, &id, payload.status)
        .await?;
    Ok(Json(booking))
}

/// DELETE /api/bookings/{id}
pub async fn delete(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    BookingRepository::new(state.db.clone())
        .delete(&tenant.id, &id)
        .await?;
    Ok(Json(true))
}
