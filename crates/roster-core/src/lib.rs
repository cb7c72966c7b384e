//! Shared domain layer for the roster CLI: entities, the SQLite-backed
//! store, and field validation.

pub mod model;
pub mod store;
pub mod validate;
