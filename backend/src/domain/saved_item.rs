//! Saved item data model.
//!
//! A saved item is a user's bookmark of an entry in the external catalogue
//! service, tagged with the entry's kind and the user's rating. All types
//! here validate on construction; adapters never hand unchecked values to
//! the service layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Lowest rating a user can assign.
pub const RATING_MIN: i16 = 1;
/// Highest rating a user can assign.
pub const RATING_MAX: i16 = 10;

/// Validation errors raised by saved item constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedItemValidationError {
    NonPositiveId { value: i64 },
    NonPositiveCatalogueId { value: i64 },
    RatingOutOfRange { value: i16 },
    UnknownKind { value: String },
}

impl fmt::Display for SavedItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId { value } => {
                write!(f, "saved item id must be a positive integer, got {value}")
            }
            Self::NonPositiveCatalogueId { value } => {
                write!(f, "catalogue id must be a positive integer, got {value}")
            }
            Self::RatingOutOfRange { value } => write!(
                f,
                "rating must be between {RATING_MIN} and {RATING_MAX}, got {value}"
            ),
            Self::UnknownKind { value } => {
                write!(f, "kind must be one of anime, manga; got {value}")
            }
        }
    }
}

impl std::error::Error for SavedItemValidationError {}

/// Primary key of a saved item.
///
/// ## Invariants
/// - The wrapped value is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SavedItemId(i64);

impl SavedItemId {
    /// Validate and construct a [`SavedItemId`].
    pub fn new(id: i64) -> Result<Self, SavedItemValidationError> {
        if id <= 0 {
            return Err(SavedItemValidationError::NonPositiveId { value: id });
        }
        Ok(Self(id))
    }

    /// Access the underlying integer.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SavedItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SavedItemId> for i64 {
    fn from(value: SavedItemId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for SavedItemId {
    type Error = SavedItemValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identifier of an entry in the upstream catalogue service.
///
/// ## Invariants
/// - The wrapped value is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct CatalogueId(i64);

impl CatalogueId {
    /// Validate and construct a [`CatalogueId`].
    pub fn new(id: i64) -> Result<Self, SavedItemValidationError> {
        if id <= 0 {
            return Err(SavedItemValidationError::NonPositiveCatalogueId { value: id });
        }
        Ok(Self(id))
    }

    /// Access the underlying integer.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CatalogueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CatalogueId> for i64 {
    fn from(value: CatalogueId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for CatalogueId {
    type Error = SavedItemValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Category tag describing what kind of catalogue entry an item bookmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavedItemKind {
    Anime,
    Manga,
}

impl SavedItemKind {
    /// Canonical lowercase name used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }
}

impl fmt::Display for SavedItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SavedItemKind {
    type Err = SavedItemValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("anime") {
            Ok(Self::Anime)
        } else if s.eq_ignore_ascii_case("manga") {
            Ok(Self::Manga)
        } else {
            Err(SavedItemValidationError::UnknownKind {
                value: s.to_owned(),
            })
        }
    }
}

/// A user's score for a saved item.
///
/// ## Invariants
/// - The wrapped value lies in `RATING_MIN..=RATING_MAX`.
///
/// # Examples
/// ```
/// use backend::domain::Rating;
///
/// let rating = Rating::new(8).expect("in range");
/// assert_eq!(rating.get(), 8);
/// assert!(Rating::new(11).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Rating(i16);

impl Rating {
    /// Validate and construct a [`Rating`].
    pub fn new(value: i16) -> Result<Self, SavedItemValidationError> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(SavedItemValidationError::RatingOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Access the underlying integer.
    pub fn get(&self) -> i16 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Rating> for i16 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<i16> for Rating {
    type Error = SavedItemValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A persisted saved item owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedItem {
    pub id: SavedItemId,
    pub user_id: UserId,
    pub kind: SavedItemKind,
    pub catalogue_id: CatalogueId,
    pub rating: Rating,
    pub saved_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload handed to the service layer.
///
/// The `user_id` is always the authenticated session user; adapters must not
/// populate it from client-supplied request data.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedItem {
    pub user_id: UserId,
    pub kind: SavedItemKind,
    pub catalogue_id: CatalogueId,
    pub rating: Rating,
}
