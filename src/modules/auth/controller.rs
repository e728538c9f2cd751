use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::OptionalAuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_refresh_token;
use crate::validator::ValidatedJson;

use super::model::{
    AuthEndpoints, AuthIndexResponse, LoginRequest, LoginResponse, LogoutRequest, MessageResponse,
    RefreshRequest, RefreshResponse, RegisterRequestDto,
};
use super::service::AuthService;
use crate::modules::users::model::User;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// List authentication endpoints and the current user, if any
#[utoipa::path(
    get,
    path = "/api/auth",
    responses(
        (status = 200, description = "Auth endpoints and current user status", body = AuthIndexResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(user))]
pub async fn auth_index(OptionalAuthUser(user): OptionalAuthUser) -> Json<AuthIndexResponse> {
    let current_user = user.and_then(|claims| {
        let id = uuid::Uuid::parse_str(&claims.sub).ok()?;
        Some(User {
            id,
            username: claims.username,
            email: claims.email,
            is_staff: claims.is_staff,
        })
    });

    Json(AuthIndexResponse {
        endpoints: AuthEndpoints {
            login: "/api/auth/login".to_string(),
            register: "/api/auth/register".to_string(),
            refresh: "/api/auth/refresh".to_string(),
            logout: "/api/auth/logout".to_string(),
        },
        user: current_user,
    })
}

/// Register a new user and receive a token pair
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = LoginResponse),
        (status = 400, description = "Validation error or username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    let response = AuthService::register_user(&state.db, dto, &state.jwt_config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate and receive a token pair
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Refresh the access token using a refresh token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token issued", body = RefreshResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let response = AuthService::refresh_access_token(&dto.refresh, &state.jwt_config)?;
    Ok(Json(response))
}

/// Log out
///
/// With stateless JWTs logout is handled client-side by discarding the
/// tokens; this endpoint validates the refresh token when one is supplied
/// and always reports success, mirroring the behavior clients expect.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn logout_user(
    State(state): State<AppState>,
    Json(dto): Json<LogoutRequest>,
) -> Json<MessageResponse> {
    if let Some(refresh) = dto.refresh.as_deref() {
        // Validation failure is deliberately ignored; logout never fails.
        let _ = verify_refresh_token(refresh, &state.jwt_config);
    }

    Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    })
}
