use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::User;

// JWT claims shared by access and refresh tokens. `token_type`
// distinguishes the two so a refresh token cannot authenticate requests.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub token_type: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, max = 100, message = "username must be 1-100 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Token pair issued on login and register.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub refresh: String,
    pub access: String,
    pub user: User,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh token is required"))]
    pub refresh: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LogoutRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthEndpoints {
    pub login: String,
    pub register: String,
    pub refresh: String,
    pub logout: String,
}

/// Payload of `GET /api/auth`: available endpoints plus the caller's
/// identity when a valid token was presented.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthIndexResponse {
    pub endpoints: AuthEndpoints,
    pub user: Option<User>,
}
