//! Redis cache backend implementation.
//!
//! Shares cached entities across instances through a Redis server, using a
//! `ConnectionManager` that reconnects transparently.

mod cache;
mod error;

pub use cache::RedisCache;
