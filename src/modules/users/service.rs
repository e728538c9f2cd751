use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{Profile, UpdateProfileDto, User};
use crate::utils::errors::AppError;

const PROFILE_SELECT: &str = "SELECT p.id, p.user_id, u.username, p.bio, p.age, \
     p.created_at, p.updated_at \
     FROM profiles p JOIN users u ON u.id = p.user_id";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, is_staff FROM users ORDER BY username",
        )
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_profiles(db: &PgPool) -> Result<Vec<Profile>, AppError> {
        let query = format!("{} ORDER BY u.username", PROFILE_SELECT);

        let profiles = sqlx::query_as::<_, Profile>(&query).fetch_all(db).await?;

        Ok(profiles)
    }

    #[instrument(skip(db))]
    pub async fn get_profile_by_id(db: &PgPool, id: Uuid) -> Result<Profile, AppError> {
        let query = format!("{} WHERE p.id = $1", PROFILE_SELECT);

        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Profile not found")))
    }

    /// Updates a profile. Callers other than the profile's owner are
    /// rejected, the read-only half of owner-or-read-only.
    #[instrument(skip(db))]
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProfileDto,
        caller_id: Uuid,
    ) -> Result<Profile, AppError> {
        let existing = Self::get_profile_by_id(db, id).await?;

        if existing.user_id != caller_id {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only edit your own profile"
            )));
        }

        sqlx::query(
            "UPDATE profiles
             SET bio = COALESCE($1, bio), age = COALESCE($2, age), updated_at = NOW()
             WHERE id = $3",
        )
        .bind(&dto.bio)
        .bind(dto.age)
        .bind(id)
        .execute(db)
        .await?;

        Self::get_profile_by_id(db, id).await
    }
}
