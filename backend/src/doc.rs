//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: the saved-items endpoints, the health probes, the request
//! and response schemas, and the session cookie security scheme. The
//! generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::saved_items::{
    CreateSavedItemRequest, SavedItemResponse, UpdateSavedItemRequest,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the external authentication service.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Saved items API",
        description = "HTTP interface for a user's saved catalogue entries."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::saved_items::list_saved_items,
        crate::inbound::http::saved_items::list_saved_items_for_user,
        crate::inbound::http::saved_items::list_saved_items_by_kind,
        crate::inbound::http::saved_items::create_saved_item,
        crate::inbound::http::saved_items::delete_saved_item,
        crate::inbound::http::saved_items::update_saved_item,
        crate::inbound::http::saved_items::find_saved_item_by_catalogue_id,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SavedItemResponse,
        CreateSavedItemRequest,
        UpdateSavedItemRequest,
        Error,
        ErrorCode
    )),
    tags(
        (name = "saved-items", description = "Operations on a user's saved catalogue entries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
