use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_habitat_by_id, get_habitats};

pub fn init_habitats_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_habitats))
        .route("/{id}", get(get_habitat_by_id))
}
