//! Tenant API Handlers

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{extract::State, Json};
use serde::Serialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{
    is_valid_slug, DiningTableCreate, Tenant, TenantLogin, TenantRegister, TenantResponse,
};
use crate::db::repository::{DiningTableRepository, TenantRepository};
use crate::utils::{AppError, AppResult};

/// Tables seeded for a fresh tenant
const SEEDED_TABLE_COUNT: i32 = 15;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub tenant: TenantResponse,
}

/// POST /api/tenants/register
///
/// Creates the tenant and seeds its dining tables (numbered 1..=15) so
/// a new restaurant can print QR codes immediately.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<TenantRegister>,
) -> AppResult<Json<TenantResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    if !is_valid_slug(&payload.slug) {
        return Err(AppError::validation(
            "Slug may only contain lowercase letters, digits and hyphens",
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    let tenant = Tenant {
        id: None,
        slug: payload.slug,
        name: payload.name,
        email: payload.email,
        password_hash,
        currency: payload.currency.unwrap_or_else(|| "EUR".to_string()),
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let repo = TenantRepository::new(state.db.clone());
    let created = repo.create(tenant).await?;

    let tenant_id = created
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Created tenant has no id"))?;

    let table_repo = DiningTableRepository::new(state.db.clone());
    for number in 1..=SEEDED_TABLE_COUNT {
        table_repo
            .create(&tenant_id, DiningTableCreate { number, name: None })
            .await?;
    }

    tracing::info!(slug = %created.slug, "Tenant registered");

    Ok(Json(TenantResponse::from(&created)))
}

/// POST /api/tenants/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<TenantLogin>,
) -> AppResult<Json<LoginResponse>> {
    let repo = TenantRepository::new(state.db.clone());
    let tenant = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let parsed_hash = PasswordHash::new(&tenant.password_hash)
        .map_err(|e| AppError::internal(format!("Stored hash unreadable: {}", e)))?;
    Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::invalid_credentials())?;

    let tenant_id = tenant
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Tenant record has no id"))?;

    let token = state
        .jwt_service
        .generate_token(&tenant_id, &tenant.slug, &tenant.name)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        tenant: TenantResponse::from(&tenant),
    }))
}
