//! Port for saved item persistence.
//!
//! The [`SavedItemRepository`] trait defines the contract for storing and
//! retrieving saved items. Adapters implement this trait to provide durable
//! storage (e.g., PostgreSQL); the service layer maps its errors into the
//! domain [`Error`](crate::domain::Error) payload.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::saved_item::{
    CatalogueId, NewSavedItem, Rating, SavedItem, SavedItemId, SavedItemKind,
};
use crate::domain::user::UserId;

/// Errors raised by saved item repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SavedItemRepositoryError {
    /// Repository connection could not be established.
    #[error("saved item repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("saved item repository query failed: {message}")]
    Query { message: String },

    /// The addressed saved item does not exist.
    #[error("saved item not found: {message}")]
    NotFound { message: String },
}

impl SavedItemRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a not-found error with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

/// Port for saved item storage and retrieval.
///
/// Mutating operations return the affected item's representation: deletes
/// return the removed row and rating updates return the updated row, so the
/// HTTP layer can echo them without a second round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedItemRepository: Send + Sync {
    /// Fetch every saved item in the store.
    async fn list_all(&self) -> Result<Vec<SavedItem>, SavedItemRepositoryError>;

    /// Fetch all items saved by one user.
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SavedItem>, SavedItemRepositoryError>;

    /// Fetch all items of one kind saved by one user.
    async fn list_by_user_and_kind(
        &self,
        user_id: &UserId,
        kind: SavedItemKind,
    ) -> Result<Vec<SavedItem>, SavedItemRepositoryError>;

    /// Persist a new saved item and return the stored representation.
    async fn insert(&self, item: &NewSavedItem) -> Result<SavedItem, SavedItemRepositoryError>;

    /// Delete a saved item by id, returning the removed representation.
    async fn delete(&self, id: &SavedItemId) -> Result<SavedItem, SavedItemRepositoryError>;

    /// Replace a saved item's rating, returning the updated representation.
    async fn update_rating(
        &self,
        id: &SavedItemId,
        rating: Rating,
    ) -> Result<SavedItem, SavedItemRepositoryError>;

    /// Find the item a user saved for a given catalogue entry.
    async fn find_by_user_and_catalogue_id(
        &self,
        user_id: &UserId,
        catalogue_id: &CatalogueId,
    ) -> Result<SavedItem, SavedItemRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups return empty collections or a synthesized item; mutations echo a
/// plausible stored representation. Use it where persistence behaviour is
/// not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSavedItemRepository;

fn synthesized_item(
    id: SavedItemId,
    user_id: UserId,
    kind: SavedItemKind,
    catalogue_id: CatalogueId,
    rating: Rating,
) -> SavedItem {
    let now = Utc::now();
    SavedItem {
        id,
        user_id,
        kind,
        catalogue_id,
        rating,
        saved_at: now,
        updated_at: now,
    }
}

fn fixture_item() -> Result<SavedItem, SavedItemRepositoryError> {
    let id = SavedItemId::new(1).map_err(|err| SavedItemRepositoryError::query(err.to_string()))?;
    let user_id = UserId::new(1).map_err(|err| SavedItemRepositoryError::query(err.to_string()))?;
    let catalogue_id =
        CatalogueId::new(1).map_err(|err| SavedItemRepositoryError::query(err.to_string()))?;
    let rating = Rating::new(8).map_err(|err| SavedItemRepositoryError::query(err.to_string()))?;
    Ok(synthesized_item(
        id,
        user_id,
        SavedItemKind::Anime,
        catalogue_id,
        rating,
    ))
}

#[async_trait]
impl SavedItemRepository for FixtureSavedItemRepository {
    async fn list_all(&self) -> Result<Vec<SavedItem>, SavedItemRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<SavedItem>, SavedItemRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_user_and_kind(
        &self,
        _user_id: &UserId,
        _kind: SavedItemKind,
    ) -> Result<Vec<SavedItem>, SavedItemRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, item: &NewSavedItem) -> Result<SavedItem, SavedItemRepositoryError> {
        let id =
            SavedItemId::new(1).map_err(|err| SavedItemRepositoryError::query(err.to_string()))?;
        Ok(synthesized_item(
            id,
            item.user_id,
            item.kind,
            item.catalogue_id,
            item.rating,
        ))
    }

    async fn delete(&self, _id: &SavedItemId) -> Result<SavedItem, SavedItemRepositoryError> {
        fixture_item()
    }

    async fn update_rating(
        &self,
        _id: &SavedItemId,
        rating: Rating,
    ) -> Result<SavedItem, SavedItemRepositoryError> {
        let mut item = fixture_item()?;
        item.rating = rating;
        Ok(item)
    }

    async fn find_by_user_and_catalogue_id(
        &self,
        user_id: &UserId,
        catalogue_id: &CatalogueId,
    ) -> Result<SavedItem, SavedItemRepositoryError> {
        let mut item = fixture_item()?;
        item.user_id = *user_id;
        item.catalogue_id = *catalogue_id;
        Ok(item)
    }
}
