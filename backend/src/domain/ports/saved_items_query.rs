//! Driving port for saved item reads.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::error::Error;
use crate::domain::saved_item::{CatalogueId, Rating, SavedItem, SavedItemId, SavedItemKind};
use crate::domain::user::UserId;

/// Read-side use cases exposed to inbound adapters.
///
/// Implementations surface failures as the domain [`Error`] payload; the
/// HTTP layer maps those to responses without inspecting anything beyond
/// the error code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedItemsQuery: Send + Sync {
    /// List every saved item in the system.
    async fn list_all(&self) -> Result<Vec<SavedItem>, Error>;

    /// List the items one user has saved.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<SavedItem>, Error>;

    /// List the items of one kind the user has saved.
    async fn list_for_user_by_kind(
        &self,
        user_id: &UserId,
        kind: SavedItemKind,
    ) -> Result<Vec<SavedItem>, Error>;

    /// Find the item a user saved for a given catalogue entry.
    async fn find_for_user_by_catalogue_id(
        &self,
        user_id: &UserId,
        catalogue_id: &CatalogueId,
    ) -> Result<SavedItem, Error>;
}

/// Fixture implementation returning empty collections and a synthesized
/// match, for wiring the server without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSavedItemsQuery;

#[async_trait]
impl SavedItemsQuery for FixtureSavedItemsQuery {
    async fn list_all(&self) -> Result<Vec<SavedItem>, Error> {
        Ok(Vec::new())
    }

    async fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<SavedItem>, Error> {
        Ok(Vec::new())
    }

    async fn list_for_user_by_kind(
        &self,
        _user_id: &UserId,
        _kind: SavedItemKind,
    ) -> Result<Vec<SavedItem>, Error> {
        Ok(Vec::new())
    }

    async fn find_for_user_by_catalogue_id(
        &self,
        user_id: &UserId,
        catalogue_id: &CatalogueId,
    ) -> Result<SavedItem, Error> {
        let now = Utc::now();
        Ok(SavedItem {
            id: SavedItemId::new(1).map_err(|err| Error::internal(err.to_string()))?,
            user_id: *user_id,
            kind: SavedItemKind::Anime,
            catalogue_id: *catalogue_id,
            rating: Rating::new(8).map_err(|err| Error::internal(err.to_string()))?,
            saved_at: now,
            updated_at: now,
        })
    }
}
