//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::saved_items;

/// Row struct for reading from the saved_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = saved_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SavedItemRow {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub catalogue_id: i64,
    pub rating: i16,
    pub saved_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new saved item records.
///
/// `saved_at` and `updated_at` come from the table defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = saved_items)]
pub(crate) struct NewSavedItemRow<'a> {
    pub user_id: i64,
    pub kind: &'a str,
    pub catalogue_id: i64,
    pub rating: i16,
}

/// Changeset struct for replacing a saved item's rating.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = saved_items)]
pub(crate) struct SavedItemRatingUpdate {
    pub rating: i16,
    pub updated_at: DateTime<Utc>,
}
