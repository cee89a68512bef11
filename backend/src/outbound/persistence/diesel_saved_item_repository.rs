//! PostgreSQL-backed `SavedItemRepository` implementation using Diesel ORM.
//!
//! A thin adapter: it translates between Diesel rows and domain types and
//! maps database failures to the repository port's error type. No business
//! logic lives here.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{SavedItemRepository, SavedItemRepositoryError};
use crate::domain::{
    CatalogueId, NewSavedItem, Rating, SavedItem, SavedItemId, SavedItemKind, UserId,
};

use super::models::{NewSavedItemRow, SavedItemRatingUpdate, SavedItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::saved_items;

/// Diesel-backed implementation of the `SavedItemRepository` port.
#[derive(Clone)]
pub struct DieselSavedItemRepository {
    pool: DbPool,
}

impl DieselSavedItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to repository errors.
fn map_pool_error(error: PoolError) -> SavedItemRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SavedItemRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
fn map_diesel_error(error: diesel::result::Error) -> SavedItemRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => SavedItemRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            SavedItemRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SavedItemRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => SavedItemRepositoryError::query("database error"),
        _ => SavedItemRepositoryError::query("database error"),
    }
}

/// Map Diesel's row-missing error onto the port's not-found variant.
///
/// Used for the single-row operations (delete, update, find) where a missing
/// row is an addressable outcome rather than a blanket query failure.
fn map_missing_row(
    error: diesel::result::Error,
    not_found_message: impl FnOnce() -> String,
) -> SavedItemRepositoryError {
    match error {
        diesel::result::Error::NotFound => {
            SavedItemRepositoryError::not_found(not_found_message())
        }
        other => map_diesel_error(other),
    }
}

/// Convert a database row to a domain saved item.
///
/// Rows that fail domain validation indicate data written outside this
/// service; they surface as query errors instead of being coerced.
fn row_to_saved_item(row: SavedItemRow) -> Result<SavedItem, SavedItemRepositoryError> {
    let kind = row.kind.parse::<SavedItemKind>().map_err(|_| {
        warn!(value = %row.kind, id = row.id, "unrecognised kind value in saved_items row");
        SavedItemRepositoryError::query("stored saved item has an unrecognised kind")
    })?;

    let id = SavedItemId::new(row.id)
        .map_err(|_| SavedItemRepositoryError::query("stored saved item has an invalid id"))?;
    let user_id = UserId::new(row.user_id)
        .map_err(|_| SavedItemRepositoryError::query("stored saved item has an invalid user id"))?;
    let catalogue_id = CatalogueId::new(row.catalogue_id).map_err(|_| {
        SavedItemRepositoryError::query("stored saved item has an invalid catalogue id")
    })?;
    let rating = Rating::new(row.rating).map_err(|_| {
        warn!(value = row.rating, id = row.id, "out-of-range rating in saved_items row");
        SavedItemRepositoryError::query("stored saved item has an out-of-range rating")
    })?;

    Ok(SavedItem {
        id,
        user_id,
        kind,
        catalogue_id,
        rating,
        saved_at: row.saved_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_saved_items(
    rows: Vec<SavedItemRow>,
) -> Result<Vec<SavedItem>, SavedItemRepositoryError> {
    rows.into_iter().map(row_to_saved_item).collect()
}

#[async_trait]
impl SavedItemRepository for DieselSavedItemRepository {
    async fn list_all(&self) -> Result<Vec<SavedItem>, SavedItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SavedItemRow> = saved_items::table
            .order(saved_items::id.asc())
            .select(SavedItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_saved_items(rows)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SavedItem>, SavedItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SavedItemRow> = saved_items::table
            .filter(saved_items::user_id.eq(user_id.get()))
            .order(saved_items::id.asc())
            .select(SavedItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_saved_items(rows)
    }

    async fn list_by_user_and_kind(
        &self,
        user_id: &UserId,
        kind: SavedItemKind,
    ) -> Result<Vec<SavedItem>, SavedItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SavedItemRow> = saved_items::table
            .filter(
                saved_items::user_id
                    .eq(user_id.get())
                    .and(saved_items::kind.eq(kind.as_str())),
            )
            .order(saved_items::id.asc())
            .select(SavedItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_saved_items(rows)
    }

    async fn insert(&self, item: &NewSavedItem) -> Result<SavedItem, SavedItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewSavedItemRow {
            user_id: item.user_id.get(),
            kind: item.kind.as_str(),
            catalogue_id: item.catalogue_id.get(),
            rating: item.rating.get(),
        };

        let row: SavedItemRow = diesel::insert_into(saved_items::table)
            .values(&new_row)
            .returning(SavedItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_saved_item(row)
    }

    async fn delete(&self, id: &SavedItemId) -> Result<SavedItem, SavedItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: SavedItemRow =
            diesel::delete(saved_items::table.filter(saved_items::id.eq(id.get())))
                .returning(SavedItemRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|error| {
                    map_missing_row(error, || format!("saved item {id} does not exist"))
                })?;

        row_to_saved_item(row)
    }

    async fn update_rating(
        &self,
        id: &SavedItemId,
        rating: Rating,
    ) -> Result<SavedItem, SavedItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = SavedItemRatingUpdate {
            rating: rating.get(),
            updated_at: Utc::now(),
        };

        let row: SavedItemRow =
            diesel::update(saved_items::table.filter(saved_items::id.eq(id.get())))
                .set(&update)
                .returning(SavedItemRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|error| {
                    map_missing_row(error, || format!("saved item {id} does not exist"))
                })?;

        row_to_saved_item(row)
    }

    async fn find_by_user_and_catalogue_id(
        &self,
        user_id: &UserId,
        catalogue_id: &CatalogueId,
    ) -> Result<SavedItem, SavedItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: SavedItemRow = saved_items::table
            .filter(
                saved_items::user_id
                    .eq(user_id.get())
                    .and(saved_items::catalogue_id.eq(catalogue_id.get())),
            )
            .select(SavedItemRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|error| {
                map_missing_row(error, || {
                    format!("no saved item for catalogue entry {catalogue_id}")
                })
            })?;

        row_to_saved_item(row)
    }
}
