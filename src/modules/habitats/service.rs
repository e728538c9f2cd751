use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::habitats::model::{Habitat, HabitatFilterParams, PaginatedHabitatsResponse};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

pub struct HabitatService;

impl HabitatService {
    #[instrument(skip(db))]
    pub async fn get_habitats(
        db: &PgPool,
        filters: HabitatFilterParams,
    ) -> Result<PaginatedHabitatsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM habitats")
            .fetch_one(db)
            .await?;

        let habitats = sqlx::query_as::<_, Habitat>(
            "SELECT id, name, location FROM habitats ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedHabitatsResponse {
            data: habitats,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: filters.pagination.page(),
                has_more,
            },
        })
    }

    #[instrument(skip(db))]
    pub async fn get_habitat_by_id(db: &PgPool, id: Uuid) -> Result<Habitat, AppError> {
        sqlx::query_as::<_, Habitat>("SELECT id, name, location FROM habitats WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Habitat not found")))
    }
}
