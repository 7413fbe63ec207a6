//! Middleware modules.

pub mod auth;
pub mod error;

pub use auth::{ApiKeyGate, ApiKeyMiddleware};
pub use error::{AppError, AppResult};
