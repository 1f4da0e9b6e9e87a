//! Staff View Handler
//!
//! One polling round-trip covering everything the floor staff watches:
//! in-flight orders (including served, which the kitchen no longer
//! shows), unanswered waiter calls and today's workable bookings.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{Booking, Order, OrderStatus, WaiterCall, WaiterCallStatus};
use crate::db::repository::{
    BookingRepository, OrderRepository, TenantRepository, WaiterCallRepository,
};
use crate::utils::{time, AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct StaffView {
    pub restaurant_name: String,
    pub orders: Vec<Order>,
    pub waiter_calls: Vec<WaiterCall>,
    pub bookings: Vec<Booking>,
}

/// GET /api/public/staff/{slug}
pub async fn view(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<StaffView>> {
    let tenant = TenantRepository::new(state.db.clone())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    let tenant_id = tenant
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Tenant record has no id"))?;

    let orders = OrderRepository::new(state.db.clone())
        .find_all(
            &tenant_id,
            Some(vec![
                OrderStatus::Pending,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Served,
            ]),
        )
        .await?;

    let waiter_calls = WaiterCallRepository::new(state.db.clone())
        .find_all(&tenant_id, Some(WaiterCallStatus::Pending))
        .await?;

    let bookings = BookingRepository::new(state.db.clone())
        .find_active_for_date(&tenant_id, &time::today_date_string())
        .await?;

    Ok(Json(StaffView {
        restaurant_name: tenant.name,
        orders,
        waiter_calls,
        bookings,
    }))
}
