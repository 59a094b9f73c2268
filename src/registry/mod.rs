//! Schema registrar client and cache
//!
//! Fetches schema definitions from the registrar HTTP endpoint and serves
//! them through a self-refreshing in-memory cache.

pub mod cache;
pub mod client;
pub mod snapshot;
pub mod source;

pub use cache::SchemaCache;
pub use client::RegistryClient;
pub use snapshot::{SchemaSnapshot, SchemaStore};
pub use source::SchemaSource;
