use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::enclosures::router::init_enclosures_router;
use crate::modules::feedings::router::init_feedings_router;
use crate::modules::habitats::router::init_habitats_router;
use crate::modules::users::router::{init_profiles_router, init_users_router};
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/healthcheck",
    responses(
        (status = 200, description = "Service is up", body = String)
    ),
    tag = "Healthcheck"
)]
pub async fn ping() -> &'static str {
    "Pong!"
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .route("/healthcheck", get(ping))
                .nest("/auth", init_auth_router())
                .nest("/habitats", init_habitats_router())
                .nest("/enclosures", init_enclosures_router())
                .nest("/feedings", init_feedings_router())
                .nest("/users", init_users_router())
                .nest("/profiles", init_profiles_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
