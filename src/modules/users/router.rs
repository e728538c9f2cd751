use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_profile_by_id, get_profiles, get_users, update_profile};

pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/", get(get_users))
}

pub fn init_profiles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profiles))
        .route("/{id}", get(get_profile_by_id).put(update_profile))
}
