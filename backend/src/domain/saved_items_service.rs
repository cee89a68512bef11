//! Saved items domain service.
//!
//! Implements the driving ports by delegating to the repository port. The
//! service carries no business logic of its own: its single responsibility
//! is the exhaustive mapping of repository failures into the domain
//! [`Error`] payload handed back to adapters.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::error::Error;
use crate::domain::ports::{
    SavedItemRepository, SavedItemRepositoryError, SavedItemsCommand, SavedItemsQuery,
};
use crate::domain::saved_item::{
    CatalogueId, NewSavedItem, Rating, SavedItem, SavedItemId, SavedItemKind,
};
use crate::domain::user::UserId;

/// Saved items service implementing the driving ports.
#[derive(Clone)]
pub struct SavedItemsService<R> {
    repo: Arc<R>,
}

impl<R> SavedItemsService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> SavedItemsService<R>
where
    R: SavedItemRepository,
{
    fn map_repository_error(error: SavedItemRepositoryError) -> Error {
        match error {
            SavedItemRepositoryError::Connection { message } => {
                Error::storage(format!("saved item storage unavailable: {message}"))
            }
            SavedItemRepositoryError::Query { message } => {
                Error::storage(format!("saved item storage failed: {message}"))
            }
            SavedItemRepositoryError::NotFound { message } => {
                Error::storage(message).with_details(json!({ "code": "not_found" }))
            }
        }
    }
}

#[async_trait]
impl<R> SavedItemsQuery for SavedItemsService<R>
where
    R: SavedItemRepository,
{
    async fn list_all(&self) -> Result<Vec<SavedItem>, Error> {
        self.repo
            .list_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<SavedItem>, Error> {
        self.repo
            .list_by_user(user_id)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn list_for_user_by_kind(
        &self,
        user_id: &UserId,
        kind: SavedItemKind,
    ) -> Result<Vec<SavedItem>, Error> {
        self.repo
            .list_by_user_and_kind(user_id, kind)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn find_for_user_by_catalogue_id(
        &self,
        user_id: &UserId,
        catalogue_id: &CatalogueId,
    ) -> Result<SavedItem, Error> {
        self.repo
            .find_by_user_and_catalogue_id(user_id, catalogue_id)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> SavedItemsCommand for SavedItemsService<R>
where
    R: SavedItemRepository,
{
    async fn create(&self, request: NewSavedItem) -> Result<SavedItem, Error> {
        self.repo
            .insert(&request)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn delete(&self, id: &SavedItemId) -> Result<SavedItem, Error> {
        self.repo
            .delete(id)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn update_rating(&self, id: &SavedItemId, rating: Rating) -> Result<SavedItem, Error> {
        self.repo
            .update_rating(id, rating)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockSavedItemRepository;
    use chrono::Utc;

    fn make_service(repo: MockSavedItemRepository) -> SavedItemsService<MockSavedItemRepository> {
        SavedItemsService::new(Arc::new(repo))
    }

    fn stored_item(id: i64, user_id: i64) -> SavedItem {
        let now = Utc::now();
        SavedItem {
            id: SavedItemId::new(id).expect("fixture id"),
            user_id: UserId::new(user_id).expect("fixture id"),
            kind: SavedItemKind::Anime,
            catalogue_id: CatalogueId::new(100).expect("fixture id"),
            rating: Rating::new(7).expect("in range"),
            saved_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn list_all_passes_items_through() {
        let items = vec![stored_item(1, 1), stored_item(2, 2)];
        let expected = items.clone();
        let mut repo = MockSavedItemRepository::new();
        repo.expect_list_all().times(1).return_once(move || Ok(items));

        let service = make_service(repo);
        let listed = service.list_all().await.expect("list succeeds");
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn connection_failure_maps_to_storage_error() {
        let mut repo = MockSavedItemRepository::new();
        repo.expect_list_all()
            .times(1)
            .return_once(|| Err(SavedItemRepositoryError::connection("refused")));

        let service = make_service(repo);
        let error = service.list_all().await.expect_err("storage error");
        assert_eq!(error.code, ErrorCode::Storage);
        assert!(error.message.contains("refused"));
    }

    #[tokio::test]
    async fn missing_item_maps_to_storage_error_with_not_found_details() {
        let mut repo = MockSavedItemRepository::new();
        repo.expect_delete()
            .times(1)
            .return_once(|_| Err(SavedItemRepositoryError::not_found("saved item 5 does not exist")));

        let service = make_service(repo);
        let id = SavedItemId::new(5).expect("fixture id");
        let error = service.delete(&id).await.expect_err("storage error");

        assert_eq!(error.code, ErrorCode::Storage);
        assert_eq!(error.message, "saved item 5 does not exist");
        let details = error
            .details
            .as_ref()
            .and_then(|value| value.as_object())
            .expect("details");
        assert_eq!(
            details.get("code").and_then(|v| v.as_str()),
            Some("not_found")
        );
    }

    #[tokio::test]
    async fn create_forwards_request_to_repository() {
        let request = NewSavedItem {
            user_id: UserId::new(3).expect("fixture id"),
            kind: SavedItemKind::Manga,
            catalogue_id: CatalogueId::new(55).expect("fixture id"),
            rating: Rating::new(10).expect("in range"),
        };
        let request_for_check = request.clone();
        let stored = stored_item(8, 3);
        let stored_for_check = stored.clone();

        let mut repo = MockSavedItemRepository::new();
        repo.expect_insert()
            .withf(move |item| *item == request_for_check)
            .times(1)
            .return_once(move |_| Ok(stored));

        let service = make_service(repo);
        let created = service.create(request).await.expect("create succeeds");
        assert_eq!(created, stored_for_check);
    }

    #[tokio::test]
    async fn update_rating_forwards_arguments() {
        let id = SavedItemId::new(4).expect("fixture id");
        let rating = Rating::new(2).expect("in range");
        let mut updated = stored_item(4, 1);
        updated.rating = rating;
        let updated_for_check = updated.clone();

        let mut repo = MockSavedItemRepository::new();
        repo.expect_update_rating()
            .withf(move |got_id, got_rating| *got_id == id && *got_rating == rating)
            .times(1)
            .return_once(move |_, _| Ok(updated));

        let service = make_service(repo);
        let item = service
            .update_rating(&id, rating)
            .await
            .expect("update succeeds");
        assert_eq!(item, updated_for_check);
    }

    #[tokio::test]
    async fn find_by_catalogue_id_passes_match_through() {
        let user_id = UserId::new(2).expect("fixture id");
        let catalogue_id = CatalogueId::new(100).expect("fixture id");
        let stored = stored_item(9, 2);
        let stored_for_check = stored.clone();

        let mut repo = MockSavedItemRepository::new();
        repo.expect_find_by_user_and_catalogue_id()
            .withf(move |got_user, got_catalogue| {
                *got_user == user_id && *got_catalogue == catalogue_id
            })
            .times(1)
            .return_once(move |_, _| Ok(stored));

        let service = make_service(repo);
        let item = service
            .find_for_user_by_catalogue_id(&user_id, &catalogue_id)
            .await
            .expect("find succeeds");
        assert_eq!(item, stored_for_check);
    }
}
