use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::feedings::model::{
    CreateFeedingDto, Feeding, FeedingFilterParams, PaginatedFeedingsResponse, UpdateFeedingDto,
};
use crate::modules::feedings::service::FeedingService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List feedings
#[utoipa::path(
    get,
    path = "/api/feedings",
    params(FeedingFilterParams),
    responses(
        (status = 200, description = "List of feedings", body = PaginatedFeedingsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Feedings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_feedings(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filters): Query<FeedingFilterParams>,
) -> Result<Json<PaginatedFeedingsResponse>, AppError> {
    let feedings = FeedingService::get_feedings(&state.db, filters).await?;
    Ok(Json(feedings))
}

/// Retrieve a single feeding
#[utoipa::path(
    get,
    path = "/api/feedings/{id}",
    params(
        ("id" = Uuid, Path, description = "Feeding ID")
    ),
    responses(
        (status = 200, description = "Feeding details", body = Feeding),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Feeding not found")
    ),
    tag = "Feedings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_feeding_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Feeding>, AppError> {
    let feeding = FeedingService::get_feeding_by_id(&state.db, id).await?;
    Ok(Json(feeding))
}

/// Schedule a feeding
///
/// The keeper is always the authenticated caller. The proposed window is
/// checked against existing feedings for the same enclosure before the
/// record is written.
#[utoipa::path(
    post,
    path = "/api/feedings",
    request_body = CreateFeedingDto,
    responses(
        (status = 201, description = "Feeding scheduled", body = Feeding),
        (status = 400, description = "Window in the past, inverted, or overlapping"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Feedings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_feeding(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateFeedingDto>,
) -> Result<(StatusCode, Json<Feeding>), AppError> {
    let feeding =
        FeedingService::create_feeding(&state.db, dto, auth_user.username(), Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(feeding)))
}

/// Reschedule a feeding (owner only)
#[utoipa::path(
    put,
    path = "/api/feedings/{id}",
    params(
        ("id" = Uuid, Path, description = "Feeding ID")
    ),
    request_body = UpdateFeedingDto,
    responses(
        (status = 200, description = "Feeding updated", body = Feeding),
        (status = 400, description = "Window in the past, inverted, or overlapping"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the assigned keeper"),
        (status = 404, description = "Feeding not found")
    ),
    tag = "Feedings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn update_feeding(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateFeedingDto>,
) -> Result<Json<Feeding>, AppError> {
    let feeding =
        FeedingService::update_feeding(&state.db, id, dto, auth_user.username(), Utc::now())
            .await?;
    Ok(Json(feeding))
}

/// Cancel a feeding (owner only)
#[utoipa::path(
    delete,
    path = "/api/feedings/{id}",
    params(
        ("id" = Uuid, Path, description = "Feeding ID")
    ),
    responses(
        (status = 204, description = "Feeding deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the assigned keeper"),
        (status = 404, description = "Feeding not found")
    ),
    tag = "Feedings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_feeding(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    FeedingService::delete_feeding(&state.db, id, auth_user.username()).await?;
    Ok(StatusCode::NO_CONTENT)
}
