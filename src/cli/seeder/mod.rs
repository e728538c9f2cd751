//! Sample-data seeding for development and testing.
//!
//! `seed_zoo` wipes and repopulates habitats, enclosures and feedings;
//! `seed_keepers` generates keeper accounts with fake names. Feeding
//! windows are laid out back-to-back with gaps, so the seeded data always
//! satisfies the no-overlap rule.

use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::password::hash_password;

pub struct SeedConfig {
    pub enclosures_per_habitat: usize,
    pub feedings_per_enclosure: usize,
}

pub struct SeedSummary {
    pub habitats: usize,
    pub enclosures: usize,
    pub feedings: usize,
}

const HABITATS: &[(&str, &str)] = &[
    ("African Savanna", "North Wing"),
    ("Tropical Rainforest", "East Wing"),
    ("Arctic Tundra", "South Wing"),
    ("Aquatic Center", "West Wing"),
    ("Reptile House", "Central Building"),
];

const ANIMALS: &[&str] = &[
    "Lion", "Elephant", "Giraffe", "Gorilla", "Monkey", "Polar Bear", "Penguin", "Dolphin",
    "Sea Lion", "Serpent", "Crocodile", "Rhino", "Tiger", "Flamingo", "Otter", "Panda",
];

const SUFFIXES: &[&str] = &["Enclosure", "Sanctuary", "Meadow", "Island", "Cove", "Gallery"];

/// Replaces all zoo data with a fresh sample set. Users are untouched.
pub async fn seed_zoo(
    db: &PgPool,
    config: SeedConfig,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    sqlx::query("DELETE FROM feedings").execute(db).await?;
    sqlx::query("DELETE FROM enclosures").execute(db).await?;
    sqlx::query("DELETE FROM habitats").execute(db).await?;

    let mut rng = rand::thread_rng();

    let mut habitat_ids = Vec::with_capacity(HABITATS.len());
    for (name, location) in HABITATS {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO habitats (name, location) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(location)
        .fetch_one(db)
        .await?;
        habitat_ids.push(id);
    }

    let mut enclosure_ids = Vec::new();
    for &habitat_id in &habitat_ids {
        for i in 0..config.enclosures_per_habitat {
            let animal = ANIMALS.choose(&mut rng).unwrap_or(&"Lion");
            let suffix = SUFFIXES.choose(&mut rng).unwrap_or(&"Enclosure");
            let capacity: i32 = rng.gen_range(2..=50);
            // Roughly one enclosure per habitat is under renovation
            let is_active = i != 0 || rng.gen_bool(0.8);

            let id: Uuid = sqlx::query_scalar(
                "INSERT INTO enclosures (name, capacity, is_active, habitat_id)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id",
            )
            .bind(format!("{} {}", animal, suffix))
            .bind(capacity)
            .bind(is_active)
            .bind(habitat_id)
            .fetch_one(db)
            .await?;
            enclosure_ids.push(id);
        }
    }

    // Feedings start tomorrow morning, spaced two hours apart per
    // enclosure; one-hour windows never overlap by construction.
    let day_start = (Utc::now() + Duration::days(1))
        .date_naive()
        .and_hms_opt(8, 0, 0)
        .expect("valid time")
        .and_utc();

    let mut feedings = 0usize;
    for &enclosure_id in &enclosure_ids {
        for slot in 0..config.feedings_per_enclosure {
            let keeper: String = format!(
                "{} {}",
                FirstName().fake::<String>(),
                LastName().fake::<String>()
            );
            let start = day_start + Duration::hours(2 * slot as i64);
            let end = start + Duration::hours(1);

            sqlx::query(
                "INSERT INTO feedings (enclosure_id, keeper, start_time, end_time)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(enclosure_id)
            .bind(&keeper)
            .bind(start)
            .bind(end)
            .execute(db)
            .await?;
            feedings += 1;
        }
    }

    Ok(SeedSummary {
        habitats: habitat_ids.len(),
        enclosures: enclosure_ids.len(),
        feedings,
    })
}

struct KeeperSeed {
    username: String,
    email: String,
    password_hash: String,
}

/// Creates `count` keeper accounts, all sharing `password`. Existing
/// non-staff users are removed first.
pub async fn seed_keepers(
    db: &PgPool,
    count: usize,
    password: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    sqlx::query("DELETE FROM users WHERE is_staff = FALSE")
        .execute(db)
        .await?;

    // Hash once; bcrypt is far too slow to run per user.
    let password_hash =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let keepers: Vec<KeeperSeed> = (0..count)
        .into_par_iter()
        .map(|i| KeeperSeed {
            username: format!("keeper{}", i + 1),
            email: format!("keeper{}@zoo.com", i + 1),
            password_hash: password_hash.clone(),
        })
        .collect();

    let mut tx = db.begin().await?;
    for keeper in &keepers {
        let user_id: Uuid = sqlx::query_scalar(
            "INSERT INTO users (username, email, password)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&keeper.username)
        .bind(&keeper.email)
        .bind(&keeper.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    Ok(keepers.len())
}
