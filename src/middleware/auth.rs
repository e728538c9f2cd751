use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{TOKEN_TYPE_ACCESS, verify_token};

/// Extractor that validates the bearer token and provides the authenticated
/// user's claims. Only access tokens are accepted here; refresh tokens are
/// handled by the auth module.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn is_staff(&self) -> bool {
        self.0.is_staff
    }
}

fn claims_from_parts(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Missing authorization header")))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
    })?;

    let claims = verify_token(token, &state.jwt_config)?;

    if claims.token_type != TOKEN_TYPE_ACCESS {
        return Err(AppError::unauthorized(anyhow::anyhow!(
            "Refresh tokens cannot be used for authentication"
        )));
    }

    Ok(claims)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AuthUser(claims_from_parts(parts, state)?))
    }
}

/// Extractor for endpoints that behave differently for anonymous callers but
/// never reject them, e.g. the auth index endpoint.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Claims>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(claims_from_parts(parts, state).ok()))
    }
}

/// Extractor that additionally requires the `is_staff` flag. Used for
/// enclosure writes, which are admin-or-read-only.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state)?;

        if !claims.is_staff {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Staff privileges required"
            )));
        }

        Ok(AdminUser(claims))
    }
}
