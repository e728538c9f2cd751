use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema, Clone)]
pub struct Habitat {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct HabitatFilterParams {
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedHabitatsResponse {
    pub data: Vec<Habitat>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
