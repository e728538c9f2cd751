use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Feeding {
    pub id: Uuid,
    pub enclosure_id: Uuid,
    pub keeper: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// The keeper is not part of the payload: it is always the authenticated
/// user who creates the feeding.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFeedingDto {
    pub enclosure_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Full replace of the scheduled window; the keeper stays unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFeedingDto {
    pub enclosure_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct FeedingFilterParams {
    /// Filter by enclosure
    pub enclosure: Option<Uuid>,
    /// Exact keeper name
    pub keeper: Option<String>,
    /// Feedings starting on this calendar date (UTC)
    pub start_date: Option<NaiveDate>,
    /// Feedings starting at or after this instant
    pub start_after: Option<DateTime<Utc>>,
    /// Feedings starting at or before this instant
    pub start_before: Option<DateTime<Utc>>,
    /// Matches keeper name or enclosure name
    pub search: Option<String>,
    /// One of: start_time, -start_time, end_time, -end_time
    pub ordering: Option<String>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedFeedingsResponse {
    pub data: Vec<Feeding>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
