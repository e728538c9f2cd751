//! Administrative commands exposed by the `menagerie-cli` binary.

pub mod seeder;

use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Creates a staff user (with their profile) directly in the database.
/// Staff accounts cannot be created through the API.
pub async fn create_admin(
    db: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    let user_id: Option<uuid::Uuid> = sqlx::query_scalar(
        "INSERT INTO users (username, email, password, is_staff)
         VALUES ($1, $2, $3, TRUE)
         ON CONFLICT (username) DO NOTHING
         RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(hashed_password)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(user_id) = user_id else {
        return Err("User with this username already exists".into());
    };

    sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}
