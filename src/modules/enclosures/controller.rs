use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AdminUser;
use crate::modules::enclosures::model::{
    CreateEnclosureDto, EnclosureFilterParams, EnclosureResponse, PaginatedEnclosuresResponse,
    UpdateEnclosureDto,
};
use crate::modules::enclosures::service::EnclosureService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List active enclosures
#[utoipa::path(
    get,
    path = "/api/enclosures",
    params(EnclosureFilterParams),
    responses(
        (status = 200, description = "List of active enclosures", body = PaginatedEnclosuresResponse)
    ),
    tag = "Enclosures"
)]
#[instrument(skip(state))]
pub async fn get_enclosures(
    State(state): State<AppState>,
    Query(filters): Query<EnclosureFilterParams>,
) -> Result<Json<PaginatedEnclosuresResponse>, AppError> {
    let enclosures = EnclosureService::get_enclosures(&state.db, filters).await?;
    Ok(Json(enclosures))
}

/// Retrieve a single enclosure (active or not)
#[utoipa::path(
    get,
    path = "/api/enclosures/{id}",
    params(
        ("id" = Uuid, Path, description = "Enclosure ID")
    ),
    responses(
        (status = 200, description = "Enclosure details", body = EnclosureResponse),
        (status = 404, description = "Enclosure not found")
    ),
    tag = "Enclosures"
)]
#[instrument(skip(state))]
pub async fn get_enclosure_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnclosureResponse>, AppError> {
    let enclosure = EnclosureService::get_enclosure_by_id(&state.db, id).await?;
    Ok(Json(enclosure))
}

/// Create an enclosure (staff only)
#[utoipa::path(
    post,
    path = "/api/enclosures",
    request_body = CreateEnclosureDto,
    responses(
        (status = 201, description = "Enclosure created", body = EnclosureResponse),
        (status = 400, description = "Invalid input or unknown habitat"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff only")
    ),
    tag = "Enclosures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin))]
pub async fn create_enclosure(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateEnclosureDto>,
) -> Result<(StatusCode, Json<EnclosureResponse>), AppError> {
    let enclosure = EnclosureService::create_enclosure(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(enclosure)))
}

/// Update an enclosure (staff only)
#[utoipa::path(
    put,
    path = "/api/enclosures/{id}",
    params(
        ("id" = Uuid, Path, description = "Enclosure ID")
    ),
    request_body = UpdateEnclosureDto,
    responses(
        (status = 200, description = "Enclosure updated", body = EnclosureResponse),
        (status = 400, description = "Invalid input or unknown habitat"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff only"),
        (status = 404, description = "Enclosure not found")
    ),
    tag = "Enclosures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin))]
pub async fn update_enclosure(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateEnclosureDto>,
) -> Result<Json<EnclosureResponse>, AppError> {
    let enclosure = EnclosureService::update_enclosure(&state.db, id, dto).await?;
    Ok(Json(enclosure))
}

/// Delete an enclosure (staff only)
#[utoipa::path(
    delete,
    path = "/api/enclosures/{id}",
    params(
        ("id" = Uuid, Path, description = "Enclosure ID")
    ),
    responses(
        (status = 204, description = "Enclosure deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff only"),
        (status = 404, description = "Enclosure not found")
    ),
    tag = "Enclosures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin))]
pub async fn delete_enclosure(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    EnclosureService::delete_enclosure(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
