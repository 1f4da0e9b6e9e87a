//! Order API Handlers

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentTenant;
use crate::cart::{Cart, CartLine};
use crate::core::ServerState;
use crate::db::models::{Order, OrderSetStatus, OrderStats, OrderStatus, RevenueBucket};
use crate::db::repository::{DiningTableRepository, OrderRepository, TenantRepository};
use crate::utils::{time, AppError, AppResult};

/// Public order submission payload
#[derive(Debug, Deserialize)]
pub struct OrderSubmit {
    pub table_id: String,
    #[serde(default)]
    pub note: String,
    pub lines: Vec<CartLine>,
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Comma-separated status filter, e.g. `pending,preparing`
    pub status: Option<String>,
}

fn parse_status_filter(raw: &str) -> AppResult<Vec<OrderStatus>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| OrderStatus::from_str(s).map_err(AppError::validation))
        .collect()
}

/// POST /api/public/orders/{slug}
///
/// Materializes a guest cart into one pending order. The whole payload
/// succeeds or fails as a unit; nothing partial is ever persisted.
pub async fn submit(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<OrderSubmit>,
) -> AppResult<Json<Order>> {
    let tenant = TenantRepository::new(state.db.clone())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    let tenant_id = tenant
        .id
        .ok_or_else(|| AppError::internal("Tenant record has no id"))?;

    let table = DiningTableRepository::new(state.db.clone())
        .find_by_id(&tenant_id, &payload.table_id)
        .await?
        .ok_or_else(|| AppError::unresolved_table(payload.table_id.clone()))?;
    let table_id = table
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Table record has no id"))?;

    let mut cart = Cart::new();
    for line in payload.lines {
        line.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        cart.add_line(line);
    }
    let lines = cart.into_order_lines()?;

    let order = Order {
        id: None,
        tenant: tenant_id,
        table: table_id,
        table_number: table.number,
        note: payload.note,
        status: OrderStatus::Pending,
        lines,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let created = OrderRepository::new(state.db.clone()).create(order).await?;

    tracing::info!(
        table = created.table_number,
        total = %created.total(),
        "Order placed"
    );

    Ok(Json(created))
}

/// GET /api/orders?status=pending,preparing
pub async fn list(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let statuses = match query.status.as_deref() {
        Some(raw) => Some(parse_status_filter(raw)?),
        None => None,
    };
    let orders = OrderRepository::new(state.db.clone())
        .find_all(&tenant.id, statuses)
        .await?;
    Ok(Json(orders))
}

/// PUT /api/orders/{id}/status
pub async fn set_status(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
    Path(id): Path<String>,
    Json(payload): Json<OrderSetStatus>,
) -> AppResult<Json<Order>> {
    let order = OrderRepository::new(state.db.clone())
        .set_status(&tenant.id, &id, payload.status)
        .await?;
    Ok(Json(order))
}

/// GET /api/orders/stats
///
/// Revenue over four overlapping windows, recomputed from the order
/// records on every request. Cancelled orders never count; everything
/// else is recognized at placement time.
pub async fn stats(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
) -> AppResult<Json<OrderStats>> {
    let orders = OrderRepository::new(state.db.clone())
        .find_non_cancelled(&tenant.id)
        .await?;

    let today_start = time::today_start_millis();
    let week_start = time::week_start_millis();
    let month_start = time::month_start_millis();

    let mut today = RevenueBucket { count: 0, revenue: Decimal::ZERO };
    let mut week = RevenueBucket { count: 0, revenue: Decimal::ZERO };
    let mut month = RevenueBucket { count: 0, revenue: Decimal::ZERO };
    let mut all_time = RevenueBucket { count: 0, revenue: Decimal::ZERO };

    for order in &orders {
        let total = order.total();
        all_time.count += 1;
        all_time.revenue += total;
        if order.created_at >= month_start {
            month.count += 1;
            month.revenue += total;
        }
        if order.created_at >= week_start {
            week.count += 1;
            week.revenue += total;
        }
        if order.created_at >= today_start {
            today.count += 1;
            today.revenue += total;
        }
    }

    Ok(Json(OrderStats {
        today,
        week,
        month,
        all_time,
    }))
}
