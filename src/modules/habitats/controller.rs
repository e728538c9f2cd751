use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::habitats::model::{Habitat, HabitatFilterParams, PaginatedHabitatsResponse};
use crate::modules::habitats::service::HabitatService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// List habitats (public, read-only)
#[utoipa::path(
    get,
    path = "/api/habitats",
    params(HabitatFilterParams),
    responses(
        (status = 200, description = "List of habitats", body = PaginatedHabitatsResponse)
    ),
    tag = "Habitats"
)]
#[instrument(skip(state))]
pub async fn get_habitats(
    State(state): State<AppState>,
    Query(filters): Query<HabitatFilterParams>,
) -> Result<Json<PaginatedHabitatsResponse>, AppError> {
    let habitats = HabitatService::get_habitats(&state.db, filters).await?;
    Ok(Json(habitats))
}

/// Retrieve a single habitat
#[utoipa::path(
    get,
    path = "/api/habitats/{id}",
    params(
        ("id" = Uuid, Path, description = "Habitat ID")
    ),
    responses(
        (status = 200, description = "Habitat details", body = Habitat),
        (status = 404, description = "Habitat not found")
    ),
    tag = "Habitats"
)]
#[instrument(skip(state))]
pub async fn get_habitat_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Habitat>, AppError> {
    let habitat = HabitatService::get_habitat_by_id(&state.db, id).await?;
    Ok(Json(habitat))
}
