//! Feeding schedule consistency checking.
//!
//! Every create/update of a feeding passes through [`validate_schedule`]
//! before anything is written. Intervals are half-open `[start, end)`:
//! a feeding may begin at the exact instant the previous one ends, so
//! back-to-back scheduling on the same enclosure is allowed.
//!
//! The checker is stateless and takes its clock as an argument. The store
//! it queries is a trait so production code can hand it the transaction
//! that will also perform the write, keeping the read-then-write race
//! inside one transactional scope, while tests use an in-memory fake.

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Distinct rejection kinds. All three are caller-input failures and map
/// to HTTP 400; none is retried or coerced into a generic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    EndTimeInPast,
    EndBeforeStart,
    OverlapConflict,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ScheduleError::EndTimeInPast => "End time cannot be in the past",
            ScheduleError::EndBeforeStart => "End time must be after start time",
            ScheduleError::OverlapConflict => {
                "This enclosure is already scheduled for feeding during this time"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ScheduleError {}

impl ScheduleError {
    /// Wraps the kind into the HTTP error type. The kind stays
    /// downcastable from `AppError::error` for callers that need it.
    pub fn into_app_error(self) -> AppError {
        AppError::bad_request(self)
    }
}

/// The proposed time window, independent of who feeds or whether the
/// record already exists.
#[derive(Debug, Clone)]
pub struct FeedingWindow {
    pub enclosure_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Data-access collaborator: everything the checker needs to know about
/// stored feedings. Returns the ids of feedings on `enclosure_id` whose
/// interval intersects `[start, end)`; ordering is irrelevant since any
/// result is a conflict.
#[allow(async_fn_in_trait)]
pub trait OverlapStore {
    async fn find_overlapping(
        &mut self,
        enclosure_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, AppError>;
}

impl OverlapStore for Transaction<'_, Postgres> {
    async fn find_overlapping(
        &mut self,
        enclosure_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM feedings
             WHERE enclosure_id = $1 AND start_time < $2 AND end_time > $3",
        )
        .bind(enclosure_id)
        .bind(end)
        .bind(start)
        .fetch_all(&mut **self)
        .await?;

        Ok(ids)
    }
}

/// Validates a proposed feeding window against existing feedings.
///
/// `exclude_id` is the id of the record being updated, if any; a record
/// never conflicts with itself. `now` is injected rather than read from
/// the system clock so the rules are deterministic under test.
pub async fn validate_schedule<S: OverlapStore>(
    store: &mut S,
    candidate: &FeedingWindow,
    exclude_id: Option<Uuid>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if candidate.end_time < now {
        return Err(ScheduleError::EndTimeInPast.into_app_error());
    }

    if candidate.end_time <= candidate.start_time {
        return Err(ScheduleError::EndBeforeStart.into_app_error());
    }

    let overlapping = store
        .find_overlapping(candidate.enclosure_id, candidate.start_time, candidate.end_time)
        .await?;

    if overlapping.into_iter().any(|id| Some(id) != exclude_id) {
        return Err(ScheduleError::OverlapConflict.into_app_error());
    }

    Ok(())
}
