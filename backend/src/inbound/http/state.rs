//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureSavedItemsCommand, FixtureSavedItemsQuery, SavedItemsCommand, SavedItemsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub saved_items: Arc<dyn SavedItemsCommand>,
    pub saved_items_query: Arc<dyn SavedItemsQuery>,
}

impl HttpState {
    /// Construct state from the two saved-item ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{FixtureSavedItemsCommand, FixtureSavedItemsQuery};
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureSavedItemsCommand),
    ///     Arc::new(FixtureSavedItemsQuery),
    /// );
    /// let _query = state.saved_items_query.clone();
    /// ```
    pub fn new(
        saved_items: Arc<dyn SavedItemsCommand>,
        saved_items_query: Arc<dyn SavedItemsQuery>,
    ) -> Self {
        Self {
            saved_items,
            saved_items_query,
        }
    }

    /// Fixture-backed state for tests and database-less deployments.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureSavedItemsCommand),
            Arc::new(FixtureSavedItemsQuery),
        )
    }
}
