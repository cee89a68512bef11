//! Saved items HTTP handlers.
//!
//! ```text
//! GET    /api/v1/saved-items
//! GET    /api/v1/users/{id}/saved-items
//! GET    /api/v1/saved-items/kind/{kind}
//! POST   /api/v1/saved-items
//! DELETE /api/v1/saved-items/{id}
//! PATCH  /api/v1/saved-items/{id}
//! GET    /api/v1/saved-items/catalogue/{catalogue_id}
//! ```
//!
//! Handlers validate inputs, delegate exactly once to the saved-items ports,
//! and echo the port result. The authenticated user always comes from the
//! session context, never from the request.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, NewSavedItem, SavedItem, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, catalogue_id_from_body, missing_field_error, parse_catalogue_id, parse_kind,
    parse_rating, parse_saved_item_id, parse_user_id,
};

const ID_FIELD: FieldName = FieldName::new("id");
const USER_ID_FIELD: FieldName = FieldName::new("id");
const KIND_FIELD: FieldName = FieldName::new("kind");
const RATING_FIELD: FieldName = FieldName::new("rating");
const CATALOGUE_ID_FIELD: FieldName = FieldName::new("catalogueId");

/// Request payload for creating a saved item.
///
/// The owning user is never part of the payload; it is derived from the
/// session.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSavedItemRequest {
    pub catalogue_id: Option<i64>,
    pub kind: Option<String>,
    pub rating: Option<i16>,
}

/// Request payload for updating a saved item's rating.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSavedItemRequest {
    pub rating: Option<i16>,
}

/// Response payload for a saved item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedItemResponse {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub catalogue_id: i64,
    pub rating: i16,
    pub saved_at: String,
    pub updated_at: String,
}

impl From<SavedItem> for SavedItemResponse {
    fn from(value: SavedItem) -> Self {
        Self {
            id: value.id.get(),
            user_id: value.user_id.get(),
            kind: value.kind.to_string(),
            catalogue_id: value.catalogue_id.get(),
            rating: value.rating.get(),
            saved_at: value.saved_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn to_responses(items: Vec<SavedItem>) -> Vec<SavedItemResponse> {
    items.into_iter().map(SavedItemResponse::from).collect()
}

fn parse_create_request(
    user_id: UserId,
    payload: CreateSavedItemRequest,
) -> Result<NewSavedItem, Error> {
    let catalogue_id = payload
        .catalogue_id
        .ok_or_else(|| missing_field_error(CATALOGUE_ID_FIELD))?;
    let kind = payload
        .kind
        .ok_or_else(|| missing_field_error(KIND_FIELD))?;
    let rating = payload
        .rating
        .ok_or_else(|| missing_field_error(RATING_FIELD))?;

    Ok(NewSavedItem {
        user_id,
        kind: parse_kind(&kind, KIND_FIELD)?,
        catalogue_id: catalogue_id_from_body(catalogue_id, CATALOGUE_ID_FIELD)?,
        rating: parse_rating(rating, RATING_FIELD)?,
    })
}

/// List every saved item in the system.
#[utoipa::path(
    get,
    path = "/api/v1/saved-items",
    responses(
        (status = 200, description = "Saved items", body = [SavedItemResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["saved-items"],
    operation_id = "listSavedItems"
)]
#[get("/saved-items")]
pub async fn list_saved_items(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SavedItemResponse>>> {
    debug!("listing all saved items");
    let items = state.saved_items_query.list_all().await?;
    Ok(web::Json(to_responses(items)))
}

/// List the items one user has saved.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/saved-items",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Saved items for the user", body = [SavedItemResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["saved-items"],
    operation_id = "listSavedItemsForUser"
)]
#[get("/users/{id}/saved-items")]
pub async fn list_saved_items_for_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SavedItemResponse>>> {
    let raw = path.into_inner();
    debug!(user_id = %raw, "listing saved items for user");
    let user_id = parse_user_id(&raw, USER_ID_FIELD)?;
    let items = state.saved_items_query.list_for_user(&user_id).await?;
    Ok(web::Json(to_responses(items)))
}

/// List the authenticated user's saved items of one kind.
#[utoipa::path(
    get,
    path = "/api/v1/saved-items/kind/{kind}",
    params(("kind" = String, Path, description = "Saved item kind: anime or manga")),
    responses(
        (status = 200, description = "Saved items of the kind", body = [SavedItemResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["saved-items"],
    operation_id = "listSavedItemsByKind"
)]
#[get("/saved-items/kind/{kind}")]
pub async fn list_saved_items_by_kind(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SavedItemResponse>>> {
    let raw = path.into_inner();
    debug!(kind = %raw, "listing saved items by kind");
    let user_id = session.require_user_id()?;
    let kind = parse_kind(&raw, KIND_FIELD)?;
    let items = state
        .saved_items_query
        .list_for_user_by_kind(&user_id, kind)
        .await?;
    Ok(web::Json(to_responses(items)))
}

/// Save a catalogue entry for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/saved-items",
    request_body = CreateSavedItemRequest,
    responses(
        (status = 201, description = "Created saved item", body = SavedItemResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["saved-items"],
    operation_id = "createSavedItem"
)]
#[post("/saved-items")]
pub async fn create_saved_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateSavedItemRequest>,
) -> ApiResult<HttpResponse> {
    debug!("creating saved item");
    let user_id = session.require_user_id()?;
    let request = parse_create_request(user_id, payload.into_inner())?;
    let item = state.saved_items.create(request).await?;
    Ok(HttpResponse::Created().json(SavedItemResponse::from(item)))
}

/// Delete a saved item and return its last representation.
#[utoipa::path(
    delete,
    path = "/api/v1/saved-items/{id}",
    params(("id" = i64, Path, description = "Saved item id")),
    responses(
        (status = 200, description = "Deleted saved item", body = SavedItemResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["saved-items"],
    operation_id = "deleteSavedItem"
)]
#[delete("/saved-items/{id}")]
pub async fn delete_saved_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SavedItemResponse>> {
    let raw = path.into_inner();
    debug!(id = %raw, "deleting saved item");
    let id = parse_saved_item_id(&raw, ID_FIELD)?;
    let item = state.saved_items.delete(&id).await?;
    Ok(web::Json(SavedItemResponse::from(item)))
}

/// Replace a saved item's rating.
#[utoipa::path(
    patch,
    path = "/api/v1/saved-items/{id}",
    params(("id" = i64, Path, description = "Saved item id")),
    request_body = UpdateSavedItemRequest,
    responses(
        (status = 200, description = "Updated saved item", body = SavedItemResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["saved-items"],
    operation_id = "updateSavedItem"
)]
#[patch("/saved-items/{id}")]
pub async fn update_saved_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateSavedItemRequest>,
) -> ApiResult<web::Json<SavedItemResponse>> {
    let raw = path.into_inner();
    debug!(id = %raw, "updating saved item rating");
    let id = parse_saved_item_id(&raw, ID_FIELD)?;
    let rating = payload
        .into_inner()
        .rating
        .ok_or_else(|| missing_field_error(RATING_FIELD))?;
    let rating = parse_rating(rating, RATING_FIELD)?;
    let item = state.saved_items.update_rating(&id, rating).await?;
    Ok(web::Json(SavedItemResponse::from(item)))
}

/// Find the item the authenticated user saved for a catalogue entry.
#[utoipa::path(
    get,
    path = "/api/v1/saved-items/catalogue/{catalogue_id}",
    params(("catalogue_id" = i64, Path, description = "External catalogue entry id")),
    responses(
        (status = 200, description = "Matching saved item", body = SavedItemResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["saved-items"],
    operation_id = "findSavedItemByCatalogueId"
)]
#[get("/saved-items/catalogue/{catalogue_id}")]
pub async fn find_saved_item_by_catalogue_id(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SavedItemResponse>> {
    let raw = path.into_inner();
    debug!(catalogue_id = %raw, "looking up saved item by catalogue id");
    let user_id = session.require_user_id()?;
    let catalogue_id = parse_catalogue_id(&raw, CATALOGUE_ID_FIELD)?;
    let item = state
        .saved_items_query
        .find_for_user_by_catalogue_id(&user_id, &catalogue_id)
        .await?;
    Ok(web::Json(SavedItemResponse::from(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockSavedItemsCommand, MockSavedItemsQuery};
    use crate::domain::{CatalogueId, ErrorCode, Rating, SavedItemId, SavedItemKind};
    use actix_web::http::StatusCode;
    use actix_web::App;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    fn stored_item(id: i64, user_id: i64) -> SavedItem {
        let now = Utc::now();
        SavedItem {
            id: SavedItemId::new(id).expect("fixture id"),
            user_id: UserId::new(user_id).expect("fixture id"),
            kind: SavedItemKind::Anime,
            catalogue_id: CatalogueId::new(500).expect("fixture id"),
            rating: Rating::new(7).expect("in range"),
            saved_at: now,
            updated_at: now,
        }
    }

    fn state_with(query: MockSavedItemsQuery, command: MockSavedItemsCommand) -> HttpState {
        HttpState::new(Arc::new(command), Arc::new(query))
    }

    fn valid_payload() -> CreateSavedItemRequest {
        CreateSavedItemRequest {
            catalogue_id: Some(120),
            kind: Some("anime".to_owned()),
            rating: Some(9),
        }
    }

    #[rstest]
    fn parse_create_request_uses_session_user() {
        let user_id = UserId::new(33).expect("fixture id");
        let request = parse_create_request(user_id, valid_payload()).expect("valid payload");

        assert_eq!(request.user_id, user_id);
        assert_eq!(request.kind, SavedItemKind::Anime);
        assert_eq!(request.catalogue_id.get(), 120);
        assert_eq!(request.rating.get(), 9);
    }

    #[rstest]
    #[case(
        CreateSavedItemRequest { catalogue_id: None, kind: Some("anime".to_owned()), rating: Some(5) },
        "catalogueId"
    )]
    #[case(
        CreateSavedItemRequest { catalogue_id: Some(1), kind: None, rating: Some(5) },
        "kind"
    )]
    #[case(
        CreateSavedItemRequest { catalogue_id: Some(1), kind: Some("anime".to_owned()), rating: None },
        "rating"
    )]
    fn parse_create_request_rejects_missing_fields(
        #[case] payload: CreateSavedItemRequest,
        #[case] field: &str,
    ) {
        let user_id = UserId::new(1).expect("fixture id");
        let error = parse_create_request(user_id, payload).expect_err("missing field");

        assert_eq!(error.code, ErrorCode::InvalidRequest);
        let details = error
            .details
            .as_ref()
            .and_then(|value| value.as_object())
            .expect("details");
        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    }

    #[rstest]
    fn parse_create_request_rejects_unknown_kind() {
        let user_id = UserId::new(1).expect("fixture id");
        let mut payload = valid_payload();
        payload.kind = Some("podcast".to_owned());

        let error = parse_create_request(user_id, payload).expect_err("unknown kind");
        assert_eq!(error.code, ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn saved_item_response_maps_domain_values() {
        let item = stored_item(3, 14);
        let response = SavedItemResponse::from(item.clone());

        assert_eq!(response.id, 3);
        assert_eq!(response.user_id, 14);
        assert_eq!(response.kind, "anime");
        assert_eq!(response.catalogue_id, 500);
        assert_eq!(response.rating, 7);
        assert_eq!(response.saved_at, item.saved_at.to_rfc3339());
    }

    #[actix_web::test]
    async fn list_saved_items_passes_collection_through() {
        let mut query = MockSavedItemsQuery::new();
        query
            .expect_list_all()
            .times(1)
            .return_once(|| Ok(vec![stored_item(1, 1), stored_item(2, 2)]));

        let state = state_with(query, MockSavedItemsCommand::new());
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_saved_items),
        )
        .await;

        let res =
            actix_web::test::call_service(&app, actix_web::test::TestRequest::get().uri("/saved-items").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<SavedItemResponse> = actix_web::test::read_body_json(res).await;
        assert_eq!(body.len(), 2);
        assert_eq!(body.first().map(|item| item.id), Some(1));
    }

    #[actix_web::test]
    async fn storage_failure_returns_coded_summary() {
        let mut query = MockSavedItemsQuery::new();
        query
            .expect_list_all()
            .times(1)
            .return_once(|| Err(Error::storage("saved item storage failed: timeout")));

        let state = state_with(query, MockSavedItemsCommand::new());
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_saved_items),
        )
        .await;

        let res =
            actix_web::test::call_service(&app, actix_web::test::TestRequest::get().uri("/saved-items").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Error = actix_web::test::read_body_json(res).await;
        assert_eq!(body.code, ErrorCode::Storage);
        assert_eq!(body.message, "saved item storage failed: timeout");
    }

    #[actix_web::test]
    async fn unknown_failure_returns_generic_payload() {
        let mut query = MockSavedItemsQuery::new();
        query
            .expect_list_all()
            .times(1)
            .return_once(|| Err(Error::internal("pool poisoned")));

        let state = state_with(query, MockSavedItemsCommand::new());
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_saved_items),
        )
        .await;

        let res =
            actix_web::test::call_service(&app, actix_web::test::TestRequest::get().uri("/saved-items").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Error = actix_web::test::read_body_json(res).await;
        assert_eq!(body.code, ErrorCode::InternalError);
        assert_eq!(body.message, "Internal server error");
    }

    #[actix_web::test]
    async fn delete_returns_removed_representation() {
        let mut command = MockSavedItemsCommand::new();
        command
            .expect_delete()
            .withf(|id| id.get() == 5)
            .times(1)
            .return_once(|_| Ok(stored_item(5, 1)));

        let state = state_with(MockSavedItemsQuery::new(), command);
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(delete_saved_item),
        )
        .await;

        let res = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::delete().uri("/saved-items/5").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: SavedItemResponse = actix_web::test::read_body_json(res).await;
        assert_eq!(body.id, 5);
    }

    #[actix_web::test]
    async fn delete_rejects_non_numeric_id() {
        let state = state_with(MockSavedItemsQuery::new(), MockSavedItemsCommand::new());
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(delete_saved_item),
        )
        .await;

        let res = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::delete()
                .uri("/saved-items/latest")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = actix_web::test::read_body_json(res).await;
        assert_eq!(body.code, ErrorCode::InvalidRequest);
    }

    #[actix_web::test]
    async fn update_rejects_missing_rating() {
        let state = state_with(MockSavedItemsQuery::new(), MockSavedItemsCommand::new());
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(update_saved_item),
        )
        .await;

        let res = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::patch()
                .uri("/saved-items/3")
                .set_json(UpdateSavedItemRequest { rating: None })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = actix_web::test::read_body_json(res).await;
        let details = body
            .details
            .as_ref()
            .and_then(|value| value.as_object())
            .expect("details");
        assert_eq!(
            details.get("field").and_then(Value::as_str),
            Some("rating")
        );
    }

    #[actix_web::test]
    async fn update_passes_rating_to_port() {
        let mut command = MockSavedItemsCommand::new();
        command
            .expect_update_rating()
            .withf(|id, rating| id.get() == 3 && rating.get() == 2)
            .times(1)
            .return_once(|_, _| {
                let mut item = stored_item(3, 1);
                item.rating = Rating::new(2).expect("in range");
                Ok(item)
            });

        let state = state_with(MockSavedItemsQuery::new(), command);
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(update_saved_item),
        )
        .await;

        let res = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::patch()
                .uri("/saved-items/3")
                .set_json(UpdateSavedItemRequest { rating: Some(2) })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: SavedItemResponse = actix_web::test::read_body_json(res).await;
        assert_eq!(body.rating, 2);
    }

    #[actix_web::test]
    async fn list_for_user_takes_identity_from_path() {
        let mut query = MockSavedItemsQuery::new();
        query
            .expect_list_for_user()
            .withf(|user_id| user_id.get() == 77)
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let state = state_with(query, MockSavedItemsCommand::new());
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_saved_items_for_user),
        )
        .await;

        let res = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::get()
                .uri("/users/77/saved-items")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
