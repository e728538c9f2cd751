use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::habitats::model::Habitat;

/// Flat row shape produced by the enclosure queries; joined habitat columns
/// and the two computed fields come back alongside the enclosure itself.
#[derive(Debug, FromRow)]
pub struct EnclosureRow {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub is_active: bool,
    pub habitat_id: Uuid,
    pub habitat_name: String,
    pub habitat_location: String,
    pub feeding_count: i64,
    pub is_available_now: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnclosureResponse {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub is_active: bool,
    pub habitat: Habitat,
    /// Total number of feedings ever scheduled for this enclosure
    pub feeding_count: i64,
    /// Whether no feeding is in progress right now
    pub is_available_now: bool,
}

impl From<EnclosureRow> for EnclosureResponse {
    fn from(row: EnclosureRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            capacity: row.capacity,
            is_active: row.is_active,
            habitat: Habitat {
                id: row.habitat_id,
                name: row.habitat_name,
                location: row.habitat_location,
            },
            feeding_count: row.feeding_count,
            is_available_now: row.is_available_now,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEnclosureDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "capacity cannot be negative"))]
    pub capacity: i32,
    pub habitat_id: Uuid,
    /// Defaults to true when omitted
    pub is_active: Option<bool>,
}

/// Full replace, mirroring an HTTP PUT: every writable field is required.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEnclosureDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "capacity cannot be negative"))]
    pub capacity: i32,
    pub habitat_id: Uuid,
    pub is_active: bool,
}

// Flattening the pagination params buffers every query value as a string,
// so numeric filters need the same lenient parsing the pagination ones use.
fn deserialize_optional_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i32>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s
            .parse::<bool>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct EnclosureFilterParams {
    /// Filter by owning habitat
    pub habitat: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub min_capacity: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub max_capacity: Option<i32>,
    /// Filter by active flag; omitted means active enclosures only
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    /// Case-insensitive name substring match
    pub name: Option<String>,
    /// Case-insensitive habitat name substring match
    pub habitat_name: Option<String>,
    /// Matches enclosure name or habitat name
    pub search: Option<String>,
    /// One of: name, -name, capacity, -capacity, id, -id
    pub ordering: Option<String>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedEnclosuresResponse {
    pub data: Vec<EnclosureResponse>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
