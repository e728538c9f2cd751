use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_refresh_token, verify_refresh_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RefreshResponse, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    /// Creates the user and their (empty) profile in one transaction, then
    /// issues a token pair.
    #[instrument(skip(db, jwt_config))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequestDto,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
                .bind(&dto.username)
                .fetch_optional(db)
                .await?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Username already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;
        let email = dto.email.unwrap_or_default();

        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password)
             VALUES ($1, $2, $3)
             RETURNING id, username, email, is_staff",
        )
        .bind(&dto.username)
        .bind(&email)
        .bind(&hashed_password)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Self::issue_tokens(user, jwt_config)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            username: String,
            email: String,
            is_staff: bool,
            password: String,
        }

        let user_with_password = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, email, is_staff, password FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid credentials")))?;

        let is_valid = verify_password(&dto.password, &user_with_password.password)?;

        if !is_valid {
            return Err(AppError::unauthorized(anyhow::anyhow!("Invalid credentials")));
        }

        let user = User {
            id: user_with_password.id,
            username: user_with_password.username,
            email: user_with_password.email,
            is_staff: user_with_password.is_staff,
        };

        Self::issue_tokens(user, jwt_config)
    }

    /// Exchanges a valid refresh token for a fresh access token. Stateless:
    /// nothing is read from the database, the refresh token itself carries
    /// the identity.
    #[instrument(skip(refresh_token, jwt_config))]
    pub fn refresh_access_token(
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<RefreshResponse, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))?;

        let access = create_access_token(
            user_id,
            &claims.username,
            &claims.email,
            claims.is_staff,
            jwt_config,
        )?;

        Ok(RefreshResponse { access })
    }

    fn issue_tokens(user: User, jwt_config: &JwtConfig) -> Result<LoginResponse, AppError> {
        let access =
            create_access_token(user.id, &user.username, &user.email, user.is_staff, jwt_config)?;
        let refresh =
            create_refresh_token(user.id, &user.username, &user.email, user.is_staff, jwt_config)?;

        Ok(LoginResponse {
            refresh,
            access,
            user,
        })
    }
}
