//! # Blog Core
//!
//! The domain layer of the blog content API.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the `Post` aggregate, slug normalization, pagination rules, the ports that
//! infrastructure implements, and the `PostStore` service in front of them.

pub mod domain;
pub mod error;
pub mod ports;
pub mod store;

pub use error::{AuthError, DomainError, RepoError};
pub use store::PostStore;
