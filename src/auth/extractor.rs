//! Axum extractor for the authenticated tenant

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use surrealdb::RecordId;

use super::jwt::{JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Tenant identity established from a Bearer token. Every protected
/// handler takes this as an argument; all repository access is scoped
/// by `id`.
#[derive(Debug, Clone)]
pub struct CurrentTenant {
    pub id: RecordId,
    pub slug: String,
    pub name: String,
}

impl FromRequestParts<ServerState> for CurrentTenant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = JwtService::extract_from_header(header).ok_or(AppError::Unauthorized)?;

        let claims = state.jwt_service.validate_token(token).map_err(|e| match e {
            JwtError::ExpiredToken => AppError::TokenExpired,
            other => AppError::invalid_token(other.to_string()),
        })?;

        let id: RecordId = claims
            .sub
            .parse()
            .map_err(|_| AppError::invalid_token("Malformed subject claim"))?;

        Ok(CurrentTenant {
            id,
            slug: claims.slug,
            name: claims.name,
        })
    }
}
