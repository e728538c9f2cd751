use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_feeding, delete_feeding, get_feeding_by_id, get_feedings, update_feeding,
};

pub fn init_feedings_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_feeding).get(get_feedings))
        .route(
            "/{id}",
            get(get_feeding_by_id)
                .put(update_feeding)
                .delete(delete_feeding),
        )
}
