//! Core types and traits for the product catalog service.
//!
//! Everything in this crate is free of I/O: domain types, request validation,
//! search value objects, cache helpers and the storage contracts that the
//! server crate implements.

pub mod cache;
pub mod catalog;
pub mod serde;
pub mod storage;
