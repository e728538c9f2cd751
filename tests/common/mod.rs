use chrono::{DateTime, Utc};
use menagerie::utils::password::hash_password;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub is_staff: bool,
}

#[allow(dead_code)]
pub fn generate_unique_username() -> String {
    format!("keeper_{}", Uuid::new_v4().simple())
}

/// Inserts a user plus their profile, the same shape `register` produces.
#[allow(dead_code)]
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    password: &str,
    is_staff: bool,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (username, email, password, is_staff)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(username)
    .bind(format!("{}@zoo.com", username))
    .bind(&hashed)
    .bind(is_staff)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
        .bind(id)
        .execute(&mut **tx)
        .await
        .unwrap();

    TestUser {
        id,
        username: username.to_string(),
        password: password.to_string(),
        is_staff,
    }
}

#[allow(dead_code)]
pub async fn create_test_habitat(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    location: &str,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO habitats (name, location) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(location)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_enclosure(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    capacity: i32,
    is_active: bool,
    habitat_id: Uuid,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO enclosures (name, capacity, is_active, habitat_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(name)
    .bind(capacity)
    .bind(is_active)
    .bind(habitat_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_feeding(
    tx: &mut Transaction<'_, Postgres>,
    enclosure_id: Uuid,
    keeper: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO feedings (enclosure_id, keeper, start_time, end_time)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(enclosure_id)
    .bind(keeper)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}
