//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; regenerate with `diesel print-schema` after migrations
//! change.

diesel::table! {
    /// Catalogue entries saved by users.
    ///
    /// Each row bookmarks one external catalogue entry for one user; the
    /// pair `(user_id, kind, catalogue_id)` is unique.
    saved_items (id) {
        /// Primary key (bigserial).
        id -> Int8,
        /// Owning user's id.
        user_id -> Int8,
        /// Category tag: `anime` or `manga`.
        kind -> Varchar,
        /// Identifier of the entry in the external catalogue service.
        catalogue_id -> Int8,
        /// User's score, 1 to 10 (enforced by a check constraint).
        rating -> Int2,
        /// Bookmark creation timestamp.
        saved_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
