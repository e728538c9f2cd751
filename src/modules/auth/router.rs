use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{auth_index, login_user, logout_user, refresh_token, register_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth_index))
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout_user))
}
