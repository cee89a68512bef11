//! Domain ports and supporting types for the hexagonal boundary.

mod saved_item_repository;
mod saved_items_command;
mod saved_items_query;

#[cfg(test)]
pub use saved_item_repository::MockSavedItemRepository;
pub use saved_item_repository::{
    FixtureSavedItemRepository, SavedItemRepository, SavedItemRepositoryError,
};
#[cfg(test)]
pub use saved_items_command::MockSavedItemsCommand;
pub use saved_items_command::{FixtureSavedItemsCommand, SavedItemsCommand};
#[cfg(test)]
pub use saved_items_query::MockSavedItemsQuery;
pub use saved_items_query::{FixtureSavedItemsQuery, SavedItemsQuery};
