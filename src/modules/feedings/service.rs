use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::feedings::model::{
    CreateFeedingDto, Feeding, FeedingFilterParams, PaginatedFeedingsResponse, UpdateFeedingDto,
};
use crate::modules::feedings::schedule::{FeedingWindow, validate_schedule};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

const FEEDING_COLUMNS: &str = "f.id, f.enclosure_id, f.keeper, f.start_time, f.end_time";

fn order_clause(ordering: Option<&str>) -> &'static str {
    match ordering {
        Some("start_time") => " ORDER BY f.start_time ASC",
        Some("end_time") => " ORDER BY f.end_time ASC",
        Some("-end_time") => " ORDER BY f.end_time DESC",
        // Newest start first is the default, matching "-start_time"
        _ => " ORDER BY f.start_time DESC",
    }
}

pub struct FeedingService;

impl FeedingService {
    #[instrument(skip(db))]
    pub async fn get_feedings(
        db: &PgPool,
        filters: FeedingFilterParams,
    ) -> Result<PaginatedFeedingsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE TRUE");
        let mut idx = 0usize;

        if filters.enclosure.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND f.enclosure_id = ${}", idx));
        }
        if filters.keeper.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND f.keeper = ${}", idx));
        }
        if filters.start_date.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND DATE(f.start_time) = ${}", idx));
        }
        if filters.start_after.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND f.start_time >= ${}", idx));
        }
        if filters.start_before.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND f.start_time <= ${}", idx));
        }
        if filters.search.is_some() {
            idx += 1;
            where_clause.push_str(&format!(
                " AND (f.keeper ILIKE ${} OR e.name ILIKE ${})",
                idx, idx
            ));
        }

        let base_from = "FROM feedings f JOIN enclosures e ON e.id = f.enclosure_id";

        let count_query = format!("SELECT COUNT(*) {}{}", base_from, where_clause);
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(enclosure) = filters.enclosure {
            count_sql = count_sql.bind(enclosure);
        }
        if let Some(keeper) = &filters.keeper {
            count_sql = count_sql.bind(keeper);
        }
        if let Some(start_date) = filters.start_date {
            count_sql = count_sql.bind(start_date);
        }
        if let Some(start_after) = filters.start_after {
            count_sql = count_sql.bind(start_after);
        }
        if let Some(start_before) = filters.start_before {
            count_sql = count_sql.bind(start_before);
        }
        if let Some(search) = &filters.search {
            count_sql = count_sql.bind(format!("%{}%", search));
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {} {}{}{} LIMIT {} OFFSET {}",
            FEEDING_COLUMNS,
            base_from,
            where_clause,
            order_clause(filters.ordering.as_deref()),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Feeding>(&data_query);
        if let Some(enclosure) = filters.enclosure {
            data_sql = data_sql.bind(enclosure);
        }
        if let Some(keeper) = &filters.keeper {
            data_sql = data_sql.bind(keeper);
        }
        if let Some(start_date) = filters.start_date {
            data_sql = data_sql.bind(start_date);
        }
        if let Some(start_after) = filters.start_after {
            data_sql = data_sql.bind(start_after);
        }
        if let Some(start_before) = filters.start_before {
            data_sql = data_sql.bind(start_before);
        }
        if let Some(search) = &filters.search {
            data_sql = data_sql.bind(format!("%{}%", search));
        }
        let feedings = data_sql.fetch_all(db).await?;

        let has_more = offset + limit < total;

        Ok(PaginatedFeedingsResponse {
            data: feedings,
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
    pub async fn get_feeding_by_id(db: &PgPool, id: Uuid) -> Result<Feeding, AppError> {
        let query = format!(
            "SELECT {} FROM feedings f WHERE f.id = $1",
            FEEDING_COLUMNS
        );

        sqlx::query_as::<_, Feeding>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Feeding not found")))
    }

    /// Validates the proposed window and inserts it, both inside one
    /// transaction so two concurrent requests cannot each pass the overlap
    /// check and both commit.
    #[instrument(skip(db))]
    pub async fn create_feeding(
        db: &PgPool,
        dto: CreateFeedingDto,
        keeper: &str,
        now: DateTime<Utc>,
    ) -> Result<Feeding, AppError> {
        Self::ensure_enclosure_exists(db, dto.enclosure_id).await?;

        let window = FeedingWindow {
            enclosure_id: dto.enclosure_id,
            start_time: dto.start_time,
            end_time: dto.end_time,
        };

        let mut tx = db.begin().await?;

        validate_schedule(&mut tx, &window, None, now).await?;

        let feeding = sqlx::query_as::<_, Feeding>(
            "INSERT INTO feedings (enclosure_id, keeper, start_time, end_time)
             VALUES ($1, $2, $3, $4)
             RETURNING id, enclosure_id, keeper, start_time, end_time",
        )
        .bind(dto.enclosure_id)
        .bind(keeper)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(feeding)
    }

    /// Full replace of the window. Only the keeper who owns the feeding may
    /// update it; the overlap check skips the record itself.
    #[instrument(skip(db))]
    pub async fn update_feeding(
        db: &PgPool,
        id: Uuid,
        dto: UpdateFeedingDto,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<Feeding, AppError> {
        let existing = Self::get_feeding_by_id(db, id).await?;

        if existing.keeper != username {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Only the assigned keeper can modify this feeding"
            )));
        }

        Self::ensure_enclosure_exists(db, dto.enclosure_id).await?;

        let window = FeedingWindow {
            enclosure_id: dto.enclosure_id,
            start_time: dto.start_time,
            end_time: dto.end_time,
        };

        let mut tx = db.begin().await?;

        validate_schedule(&mut tx, &window, Some(id), now).await?;

        let feeding = sqlx::query_as::<_, Feeding>(
            "UPDATE feedings
             SET enclosure_id = $1, start_time = $2, end_time = $3, updated_at = NOW()
             WHERE id = $4
             RETURNING id, enclosure_id, keeper, start_time, end_time",
        )
        .bind(dto.enclosure_id)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(feeding)
    }

    /// Deletes unconditionally once ownership is established; nothing else
    /// references a feeding's interval.
    #[instrument(skip(db))]
    pub async fn delete_feeding(db: &PgPool, id: Uuid, username: &str) -> Result<(), AppError> {
        let existing = Self::get_feeding_by_id(db, id).await?;

        if existing.keeper != username {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Only the assigned keeper can delete this feeding"
            )));
        }

        sqlx::query("DELETE FROM feedings WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    async fn ensure_enclosure_exists(db: &PgPool, enclosure_id: Uuid) -> Result<(), AppError> {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM enclosures WHERE id = $1")
            .bind(enclosure_id)
            .fetch_optional(db)
            .await?;

        if exists.is_none() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "enclosure_id does not reference an existing enclosure"
            )));
        }

        Ok(())
    }
}
