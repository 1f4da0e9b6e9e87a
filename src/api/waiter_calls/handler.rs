//! Waiter Call API Handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::auth::CurrentTenant;
use crate::core::ServerState;
use crate::db::models::{WaiterCall, WaiterCallCreate, WaiterCallStatus};
use crate::db::repository::{DiningTableRepository, TenantRepository, WaiterCallRepository};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct WaiterCallListQuery {
    pub status: Option<String>,
}

fn parse_status(raw: &str) -> AppResult<WaiterCallStatus> {
    match raw {
        "pending" => Ok(WaiterCallStatus::Pending),
        "acknowledged" => Ok(WaiterCallStatus::Acknowledged),
        other => Err(AppError::validation(format!(
            "unknown waiter call status: {}",
            other
        ))),
    }
}

/// POST /api/public/waiter-calls/{slug}
pub async fn submit(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<WaiterCallCreate>,
) -> AppResult<Json<WaiterCall>> {
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
        .ok_or_else(|| AppError::not_found("Table not found"))?;
    let table_id = table
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Table record has no id"))?;

    let call = WaiterCall {
        id: None,
        tenant: tenant_id,
        table: table_id,
        table_number: table.number,
        status: WaiterCallStatus::Pending,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let created = WaiterCallRepository::new(state.db.clone())
        .create(call)
        .await?;
    Ok(Json(created))
}

/// GET /api/waiter-calls?status=pending
pub async fn list(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
    Query(query): Query<WaiterCallListQuery>,
) -> AppResult<Json<Vec<WaiterCall>>> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(parse_status(raw)?),
        None => None,
    };
    let calls = WaiterCallRepository::new(state.db.clone())
        .find_all(&tenant.id, status)
        .await?;
    Ok(Json(calls))
}

/// PUT /api/waiter-calls/{id}/acknowledge
pub async fn acknowledge(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
    Path(id): Path<String>,
) -> AppResult<Json<WaiterCall>> {
    let call = WaiterCallRepository::new(state.db.clone())
        .acknowledge(&tenant.id, &id)
        .await?;
    Ok(Json(call))
}
