//! Document store abstraction.
//!
//! The API only ever touches whole JSON documents, so the seam is small:
//! get / put / remove one document, plus a pattern scan used for listings
//! and cascades. `RedisStore` is the production implementation;
//! `MemoryStore` backs the test suite and local development.

mod memory;
mod redis;

pub use memory::MemoryStore;
pub use redis::RedisStore;

use std::future::Future;

use crate::errors::AppError;

/// Persistence capability for JSON document bodies keyed by string.
pub trait DocumentStore: Clone + Send + Sync + 'static {
    /// Fetch the document at `key`, if present.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, AppError>> + Send;

    /// Write the document body at `key`, replacing any existing document.
    fn put(&self, key: &str, body: String) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Delete the document at `key`. Returns whether a document was removed.
    fn remove(&self, key: &str) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// Return the bodies of every document whose key matches the glob pattern.
    fn list(&self, pattern: &str) -> impl Future<Output = Result<Vec<String>, AppError>> + Send;
}
