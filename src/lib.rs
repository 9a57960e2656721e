//! snapi core library.
//!
//! A small social-network data API: users, thoughts, embedded reactions,
//! and the referential bookkeeping between them, over a Redis document
//! store.

pub mod api;
pub mod config;
pub mod errors;
pub mod graph;
pub mod id;
pub mod keys;
pub mod models;
pub mod repo;
pub mod store;
pub mod validators;

pub use errors::{AppError, EntityKind, ValidationError, ValidationIssue, ValidationResult};
pub use graph::SocialGraph;
pub use store::{DocumentStore, MemoryStore, RedisStore};
