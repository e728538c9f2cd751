use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::enclosures::model::{
    CreateEnclosureDto, EnclosureFilterParams, EnclosureResponse, EnclosureRow,
    PaginatedEnclosuresResponse, UpdateEnclosureDto,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

// Joined select with the two computed fields the API exposes. The
// availability probe uses closed bounds: a feeding that starts or ends
// exactly now still occupies the enclosure.
const ENCLOSURE_SELECT: &str = r#"SELECT
    e.id, e.name, e.capacity, e.is_active,
    h.id AS habitat_id, h.name AS habitat_name, h.location AS habitat_location,
    (SELECT COUNT(*) FROM feedings f WHERE f.enclosure_id = e.id) AS feeding_count,
    NOT EXISTS (
        SELECT 1 FROM feedings f
        WHERE f.enclosure_id = e.id
          AND f.start_time <= NOW()
          AND f.end_time >= NOW()
    ) AS is_available_now
    FROM enclosures e
    JOIN habitats h ON h.id = e.habitat_id"#;

const ENCLOSURE_COUNT: &str =
    "SELECT COUNT(*) FROM enclosures e JOIN habitats h ON h.id = e.habitat_id";

fn order_clause(ordering: Option<&str>) -> &'static str {
    match ordering {
        Some("name") => " ORDER BY e.name ASC",
        Some("-name") => " ORDER BY e.name DESC",
        Some("capacity") => " ORDER BY e.capacity ASC",
        Some("-capacity") => " ORDER BY e.capacity DESC",
        Some("id") => " ORDER BY e.id ASC",
        Some("-id") => " ORDER BY e.id DESC",
        _ => " ORDER BY e.name ASC",
    }
}

pub struct EnclosureService;

impl EnclosureService {
    /// Lists enclosures. Active ones only unless the `is_active` filter
    /// says otherwise; individual inactive enclosures stay reachable by id.
    #[instrument(skip(db))]
    pub async fn get_enclosures(
        db: &PgPool,
        filters: EnclosureFilterParams,
    ) -> Result<PaginatedEnclosuresResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let is_active = filters.is_active.unwrap_or(true);

        let mut where_clause = String::from(" WHERE e.is_active = $1");
        let mut idx = 1usize;

        if filters.habitat.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND e.habitat_id = ${}", idx));
        }
        if filters.min_capacity.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND e.capacity >= ${}", idx));
        }
        if filters.max_capacity.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND e.capacity <= ${}", idx));
        }
        if filters.name.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND e.name ILIKE ${}", idx));
        }
        if filters.habitat_name.is_some() {
            idx += 1;
            where_clause.push_str(&format!(" AND h.name ILIKE ${}", idx));
        }
        if filters.search.is_some() {
            idx += 1;
            where_clause.push_str(&format!(
                " AND (e.name ILIKE ${} OR h.name ILIKE ${})",
                idx, idx
            ));
        }

        let count_query = format!("{}{}", ENCLOSURE_COUNT, where_clause);
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query).bind(is_active);
        if let Some(habitat) = filters.habitat {
            count_sql = count_sql.bind(habitat);
        }
        if let Some(min_capacity) = filters.min_capacity {
            count_sql = count_sql.bind(min_capacity);
        }
        if let Some(max_capacity) = filters.max_capacity {
            count_sql = count_sql.bind(max_capacity);
        }
        if let Some(name) = &filters.name {
            count_sql = count_sql.bind(format!("%{}%", name));
        }
        if let Some(habitat_name) = &filters.habitat_name {
            count_sql = count_sql.bind(format!("%{}%", habitat_name));
        }
        if let Some(search) = &filters.search {
            count_sql = count_sql.bind(format!("%{}%", search));
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "{}{}{} LIMIT {} OFFSET {}",
            ENCLOSURE_SELECT,
            where_clause,
            order_clause(filters.ordering.as_deref()),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, EnclosureRow>(&data_query).bind(is_active);
        if let Some(habitat) = filters.habitat {
            data_sql = data_sql.bind(habitat);
        }
        if let Some(min_capacity) = filters.min_capacity {
            data_sql = data_sql.bind(min_capacity);
        }
        if let Some(max_capacity) = filters.max_capacity {
            data_sql = data_sql.bind(max_capacity);
        }
        if let Some(name) = &filters.name {
            data_sql = data_sql.bind(format!("%{}%", name));
        }
        if let Some(habitat_name) = &filters.habitat_name {
            data_sql = data_sql.bind(format!("%{}%", habitat_name));
        }
        if let Some(search) = &filters.search {
            data_sql = data_sql.bind(format!("%{}%", search));
        }
        let rows = data_sql.fetch_all(db).await?;

        let has_more = offset + limit < total;

        Ok(PaginatedEnclosuresResponse {
            data: rows.into_iter().map(EnclosureResponse::from).collect(),
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
    pub async fn get_enclosure_by_id(
        db: &PgPool,
        id: Uuid,
    ) -> Result<EnclosureResponse, AppError> {
        let query = format!("{} WHERE e.id = $1", ENCLOSURE_SELECT);

        let row = sqlx::query_as::<_, EnclosureRow>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Enclosure not found")))?;

        Ok(row.into())
    }

    #[instrument(skip(db))]
    pub async fn create_enclosure(
        db: &PgPool,
        dto: CreateEnclosureDto,
    ) -> Result<EnclosureResponse, AppError> {
        Self::ensure_habitat_exists(db, dto.habitat_id).await?;

        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO enclosures (name, capacity, is_active, habitat_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&dto.name)
        .bind(dto.capacity)
        .bind(dto.is_active.unwrap_or(true))
        .bind(dto.habitat_id)
        .fetch_one(db)
        .await?;

        Self::get_enclosure_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn update_enclosure(
        db: &PgPool,
        id: Uuid,
        dto: UpdateEnclosureDto,
    ) -> Result<EnclosureResponse, AppError> {
        Self::ensure_habitat_exists(db, dto.habitat_id).await?;

        let result = sqlx::query(
            "UPDATE enclosures
             SET name = $1, capacity = $2, is_active = $3, habitat_id = $4, updated_at = NOW()
             WHERE id = $5",
        )
        .bind(&dto.name)
        .bind(dto.capacity)
        .bind(dto.is_active)
        .bind(dto.habitat_id)
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Enclosure not found")));
        }

        Self::get_enclosure_by_id(db, id).await
    }

    /// Deleting an enclosure cascades to its feedings at the database level.
    #[instrument(skip(db))]
    pub async fn delete_enclosure(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enclosures WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Enclosure not found")));
        }

        Ok(())
    }

    async fn ensure_habitat_exists(db: &PgPool, habitat_id: Uuid) -> Result<(), AppError> {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM habitats WHERE id = $1")
            .bind(habitat_id)
            .fetch_optional(db)
            .await?;

        if exists.is_none() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "habitat_id does not reference an existing habitat"
            )));
        }

        Ok(())
    }
}
