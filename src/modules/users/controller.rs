use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::{Profile, UpdateProfileDto, User};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::get_users(&state.db).await?;
    Ok(Json(users))
}

/// List profiles
#[utoipa::path(
    get,
    path = "/api/profiles",
    responses(
        (status = 200, description = "List of profiles", body = Vec<Profile>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Profiles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_profiles(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Profile>>, AppError> {
    let profiles = UserService::get_profiles(&state.db).await?;
    Ok(Json(profiles))
}

/// Retrieve a profile
#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile details", body = Profile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found")
    ),
    tag = "Profiles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_profile_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let profile = UserService::get_profile_by_id(&state.db, id).await?;
    Ok(Json(profile))
}

/// Update a profile (owner only)
#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the profile owner"),
        (status = 404, description = "Profile not found")
    ),
    tag = "Profiles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<Profile>, AppError> {
    let caller_id = auth_user.user_id()?;
    let profile = UserService::update_profile(&state.db, id, dto, caller_id).await?;
    Ok(Json(profile))
}
