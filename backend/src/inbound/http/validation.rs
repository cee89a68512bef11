//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns a `400 invalid_request` [`Error`] with structured
//! `{field, value?, code}` details so clients can act on failures without
//! parsing prose.

use serde_json::json;

use crate::domain::{CatalogueId, Error, Rating, SavedItemId, SavedItemKind, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidRating,
    InvalidKind,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidRating => "invalid_rating",
            ErrorCode::InvalidKind => "invalid_kind",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn validation_error(
    field: FieldName,
    message: String,
    code: ErrorCode,
    value: Option<String>,
) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(object), Some(value)) = (details.as_object_mut(), value) {
        object.insert("value".to_owned(), json!(value));
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    validation_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
        None,
    )
}

pub(crate) fn invalid_id_error(field: FieldName, value: impl ToString) -> Error {
    let name = field.as_str();
    validation_error(
        field,
        format!("{name} must be a positive integer"),
        ErrorCode::InvalidId,
        Some(value.to_string()),
    )
}

fn parse_positive(value: &str, field: FieldName) -> Result<i64, Error> {
    value
        .parse::<i64>()
        .ok()
        .filter(|parsed| *parsed > 0)
        .ok_or_else(|| invalid_id_error(field, value))
}

pub(crate) fn parse_saved_item_id(value: &str, field: FieldName) -> Result<SavedItemId, Error> {
    let raw = parse_positive(value, field)?;
    SavedItemId::new(raw).map_err(|_| invalid_id_error(field, value))
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    let raw = parse_positive(value, field)?;
    UserId::new(raw).map_err(|_| invalid_id_error(field, value))
}

pub(crate) fn parse_catalogue_id(value: &str, field: FieldName) -> Result<CatalogueId, Error> {
    let raw = parse_positive(value, field)?;
    CatalogueId::new(raw).map_err(|_| invalid_id_error(field, value))
}

pub(crate) fn catalogue_id_from_body(value: i64, field: FieldName) -> Result<CatalogueId, Error> {
    CatalogueId::new(value).map_err(|_| invalid_id_error(field, value))
}

pub(crate) fn parse_rating(value: i16, field: FieldName) -> Result<Rating, Error> {
    Rating::new(value).map_err(|error| {
        validation_error(
            field,
            error.to_string(),
            ErrorCode::InvalidRating,
            Some(value.to_string()),
        )
    })
}

pub(crate) fn parse_kind(value: &str, field: FieldName) -> Result<SavedItemKind, Error> {
    value.parse::<SavedItemKind>().map_err(|error| {
        validation_error(
            field,
            error.to_string(),
            ErrorCode::InvalidKind,
            Some(value.to_owned()),
        )
    })
}
