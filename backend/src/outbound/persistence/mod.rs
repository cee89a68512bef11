//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel, with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! Principles:
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leak past this module.
//! - **Strongly typed errors**: all database failures map to the port error
//!   types.

mod diesel_saved_item_repository;
mod models;
mod pool;
mod schema;

pub use diesel_saved_item_repository::DieselSavedItemRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
