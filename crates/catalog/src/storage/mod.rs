//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `catalog_core::storage`. Products and categories live in SQLite; the
//! cache backend is chosen separately (see [`crate::cache`]).

pub mod sqlite;

pub use sqlite::SqliteRepository;
