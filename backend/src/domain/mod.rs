//! Domain primitives, ports, and services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers, the transport-agnostic error payload, and the port
//! traits forming the hexagonal boundary. Types validate on construction
//! and document their invariants in Rustdoc.

pub mod error;
pub mod ports;
pub mod saved_item;
pub mod saved_items_service;
pub mod user;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::saved_item::{
    CatalogueId, NewSavedItem, RATING_MAX, RATING_MIN, Rating, SavedItem, SavedItemId,
    SavedItemKind, SavedItemValidationError,
};
pub use self::saved_items_service::SavedItemsService;
pub use self::user::{UserId, UserValidationError};
