//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostStore;
use blog_core::ports::{PostRepository, RateLimiter};
use blog_infra::{InMemoryPostRepository, InMemoryRateLimiter, RateLimitConfig};

#[cfg(feature = "postgres")]
use blog_infra::PostgresPostRepository;

use crate::config::AppConfig;
use crate::middleware::ApiKeyGate;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostStore,
    pub gate: ApiKeyGate,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repo = Self::post_repository(config).await;

        let api_key = config.api_key.as_deref().unwrap_or_else(|| {
            tracing::warn!("BLOG_API_KEY not set. All admin requests will be rejected.");
            ""
        });

        tracing::info!(
            max_requests = config.rate_limit.max_requests,
            window_secs = config.rate_limit.window.as_secs(),
            "Rate limiter configured"
        );
        let state = Self::from_parts(repo, api_key, config.rate_limit.clone());

        tracing::info!("Application state initialized");
        state
    }

    /// In-memory state with the given admin key.
    #[cfg(test)]
    pub fn in_memory(api_key: &str, rate_limit: RateLimitConfig) -> Self {
        Self::from_parts(
            Arc::new(InMemoryPostRepository::new()),
            api_key,
            rate_limit,
        )
    }

    fn from_parts(
        repo: Arc<dyn PostRepository>,
        api_key: &str,
        rate_limit: RateLimitConfig,
    ) -> Self {
        let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(rate_limit));

        Self {
            posts: PostStore::new(repo),
            gate: ApiKeyGate::new(api_key, limiter),
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> Arc<dyn PostRepository> {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        match blog_infra::connect(db_config).await {
            Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryPostRepository::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(_config: &AppConfig) -> Arc<dyn PostRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }
}
