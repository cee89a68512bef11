//! Actix middleware for the HTTP server.

pub mod trace;
