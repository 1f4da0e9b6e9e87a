//! Dining Table API Handlers

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use crate::auth::CurrentTenant;
use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTablePublic};
use crate::db::repository::{DiningTableRepository, TenantRepository};
use crate::utils::{AppError, AppResult};

/// GET /api/tables
pub async fn list(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_all(&tenant.id).await?;
    Ok(Json(tables))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.create(&tenant.id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id}
pub async fn delete(
    State(state): State<ServerState>,
    tenant: CurrentTenant,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = DiningTableRepository::new(state.db.clone());
    repo.delete(&tenant.id, &id).await?;
    Ok(Json(true))
}

/// GET /api/public/tables/{slug}/{table_id}
///
/// QR landing page lookup. The table must belong to the restaurant
/// named by the slug; ids from other restaurants resolve to nothing.
pub async fn public_lookup(
    State(state): State<ServerState>,
    Path((slug, table_id)): Path<(String, String)>,
) -> AppResult<Json<DiningTablePublic>> {
    let tenant = TenantRepository::new(state.db.clone())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    let tenant_id = tenant
        .id
        .ok_or_else(|| AppError::internal("Tenant record has no id"))?;

    let table = DiningTableRepository::new(state.db.clone())
        .find_by_id(&tenant_id, &table_id)
        .await?
        .ok_or_else(|| AppError::not_found("Table not found"))?;

    Ok(Json(DiningTablePublic::from(&table)))
}
