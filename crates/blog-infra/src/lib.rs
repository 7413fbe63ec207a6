//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post repository via SeaORM
//! - `minimal` - No external dependencies, in-memory only

#[cfg(feature = "postgres")]
pub mod database;
pub mod posts;
pub mod rate_limit;

// Re-exports - In-Memory
pub use posts::InMemoryPostRepository;
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostRepository, connect};
