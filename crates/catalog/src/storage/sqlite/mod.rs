//! SQLite storage backend implementation.
//!
//! Implements the repository traits from `catalog_core::storage` with `sqlx`.
//! Mutations run inside `sqlx` transactions handed out through
//! [`TransactionProvider`](catalog_core::storage::TransactionProvider).

mod conversions;
mod error;
mod repository;
mod schema;
mod search;
mod transaction;

pub use repository::SqliteRepository;
