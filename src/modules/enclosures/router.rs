use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_enclosure, delete_enclosure, get_enclosure_by_id, get_enclosures, update_enclosure,
};

pub fn init_enclosures_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_enclosure).get(get_enclosures))
        .route(
            "/{id}",
            get(get_enclosure_by_id)
                .put(update_enclosure)
                .delete(delete_enclosure),
        )
}
