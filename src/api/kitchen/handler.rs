//! Kitchen View Handler
//!
//! Poll-driven work queue for the kitchen display: every order the
//! kitchen still acts on, nothing it is done with.

use axum::extract::{Path, State};
use axum::Json;

use crate::core::ServerState;
use crate::db::models::{Order, OrderStatus};
use crate::db::repository::{OrderRepository, TenantRepository};
use crate::utils::{AppError, AppResult};

/// GET /api/public/kitchen/{slug}
pub async fn view(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let tenant = TenantRepository::new(state.db.clone())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    let tenant_id = tenant
        .id
        .ok_or_else(|| AppError::internal("Tenant record has no id"))?;

    let orders = OrderRepository::new(state.db.clone())
        .find_all(
            &tenant_id,
            Some(vec![
                OrderStatus::Pending,
                OrderStatus::Preparing,
                OrderStatus::Ready,
            ]),
        )
        .await?;

    Ok(Json(orders))
}
