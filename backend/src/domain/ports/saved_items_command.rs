//! Driving port for saved item mutations.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::error::Error;
use crate::domain::saved_item::{
    CatalogueId, NewSavedItem, Rating, SavedItem, SavedItemId, SavedItemKind,
};
use crate::domain::user::UserId;

/// Write-side use cases exposed to inbound adapters.
///
/// Every mutation resolves to the affected item's representation so the
/// HTTP layer can return it in the response body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedItemsCommand: Send + Sync {
    /// Persist a new saved item for the authenticated user.
    async fn create(&self, request: NewSavedItem) -> Result<SavedItem, Error>;

    /// Delete a saved item by id and return the removed representation.
    async fn delete(&self, id: &SavedItemId) -> Result<SavedItem, Error>;

    /// Replace a saved item's rating and return the updated representation.
    async fn update_rating(&self, id: &SavedItemId, rating: Rating) -> Result<SavedItem, Error>;
}

/// Fixture implementation echoing plausible stored representations, for
/// wiring the server without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSavedItemsCommand;

fn fixture_item() -> Result<SavedItem, Error> {
    let now = Utc::now();
    Ok(SavedItem {
        id: SavedItemId::new(1).map_err(|err| Error::internal(err.to_string()))?,
        user_id: UserId::new(1).map_err(|err| Error::internal(err.to_string()))?,
        kind: SavedItemKind::Anime,
        catalogue_id: CatalogueId::new(1).map_err(|err| Error::internal(err.to_string()))?,
        rating: Rating::new(8).map_err(|err| Error::internal(err.to_string()))?,
        saved_at: now,
        updated_at: now,
    })
}

#[async_trait]
impl SavedItemsCommand for FixtureSavedItemsCommand {
    async fn create(&self, request: NewSavedItem) -> Result<SavedItem, Error> {
        let mut item = fixture_item()?;
        item.user_id = request.user_id;
        item.kind = request.kind;
        item.catalogue_id = request.catalogue_id;
        item.rating = request.rating;
        Ok(item)
    }

    async fn delete(&self, id: &SavedItemId) -> Result<SavedItem, Error> {
        let mut item = fixture_item()?;
        item.id = *id;
        Ok(item)
    }

    async fn update_rating(&self, id: &SavedItemId, rating: Rating) -> Result<SavedItem, Error> {
        let mut item = fixture_item()?;
        item.id = *id;
        item.rating = rating;
        Ok(item)
    }
}
