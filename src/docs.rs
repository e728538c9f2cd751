use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AuthEndpoints, AuthIndexResponse, LoginRequest, LoginResponse, LogoutRequest, MessageResponse,
    RefreshRequest, RefreshResponse, RegisterRequestDto,
};
use crate::modules::enclosures::model::{
    CreateEnclosureDto, EnclosureResponse, PaginatedEnclosuresResponse, UpdateEnclosureDto,
};
use crate::modules::feedings::model::{
    CreateFeedingDto, Feeding, PaginatedFeedingsResponse, UpdateFeedingDto,
};
use crate::modules::habitats::model::{Habitat, PaginatedHabitatsResponse};
use crate::modules::users::model::{Profile, UpdateProfileDto, User};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::ping,
        crate::modules::auth::controller::auth_index,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout_user,
        crate::modules::habitats::controller::get_habitats,
        crate::modules::habitats::controller::get_habitat_by_id,
        crate::modules::enclosures::controller::get_enclosures,
        crate::modules::enclosures::controller::get_enclosure_by_id,
        crate::modules::enclosures::controller::create_enclosure,
        crate::modules::enclosures::controller::update_enclosure,
        crate::modules::enclosures::controller::delete_enclosure,
        crate::modules::feedings::controller::get_feedings,
        crate::modules::feedings::controller::get_feeding_by_id,
        crate::modules::feedings::controller::create_feeding,
        crate::modules::feedings::controller::update_feeding,
        crate::modules::feedings::controller::delete_feeding,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_profiles,
        crate::modules::users::controller::get_profile_by_id,
        crate::modules::users::controller::update_profile,
    ),
    components(
        schemas(
            User,
            Profile,
            UpdateProfileDto,
            Habitat,
            PaginatedHabitatsResponse,
            EnclosureResponse,
            CreateEnclosureDto,
            UpdateEnclosureDto,
            PaginatedEnclosuresResponse,
            Feeding,
            CreateFeedingDto,
            UpdateFeedingDto,
            PaginatedFeedingsResponse,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            RefreshRequest,
            RefreshResponse,
            LogoutRequest,
            MessageResponse,
            AuthEndpoints,
            AuthIndexResponse,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Healthcheck", description = "Liveness probe"),
        (name = "Authentication", description = "User registration and JWT authentication"),
        (name = "Habitats", description = "Read-only habitat catalogue"),
        (name = "Enclosures", description = "Enclosure management"),
        (name = "Feedings", description = "Feeding schedule management"),
        (name = "Users", description = "User listing"),
        (name = "Profiles", description = "User profiles"),
    ),
    info(
        title = "Menagerie API",
        description = "Zoo management backend: habitats, enclosures and conflict-free feeding schedules",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
