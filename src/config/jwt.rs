use std::env;

// 30 minutes; feeding shifts are short, so short-lived access tokens cost
// keepers nothing while refresh covers a full week of logins.
const DEFAULT_ACCESS_TTL_SECS: i64 = 60 * 30;
const DEFAULT_REFRESH_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// Signing secret and token lifetimes, both in seconds.
///
/// `JWT_SECRET` falls back to a development value so the server starts out
/// of the box; deployments must set it.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "menagerie-dev-secret-do-not-deploy".to_string()),
            access_token_expiry: env_secs("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_TTL_SECS),
            refresh_token_expiry: env_secs("JWT_REFRESH_EXPIRY", DEFAULT_REFRESH_TTL_SECS),
        }
    }
}

fn env_secs(key: &str, default: i64) -> i64 {
    parse_secs(env::var(key).ok(), default)
}

fn parse_secs(value: Option<String>, default: i64) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
