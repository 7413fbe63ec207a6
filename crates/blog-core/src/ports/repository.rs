use async_trait::async_trait;

use crate::domain::{NewPost, Pagination, Post, PostPatch};
use crate::error::RepoError;

/// Post persistence port.
///
/// Inputs arrive already validated by [`crate::PostStore`]; implementations
/// only enforce what the storage itself guarantees (slug uniqueness, atomicity
/// of parent and child rows).
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and its child collections atomically.
    /// A taken slug yields `RepoError::Constraint`.
    async fn create(&self, slug: &str, input: NewPost) -> Result<Post, RepoError>;

    /// Find a post with its child collections in display order.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Published posts, newest first.
    async fn list_published(&self, page: Pagination) -> Result<Vec<Post>, RepoError>;

    /// Merge the supplied fields into the stored post.
    /// Yields `RepoError::NotFound` when no post has this slug.
    async fn update(&self, slug: &str, patch: PostPatch) -> Result<Post, RepoError>;

    /// Delete a post and everything it owns.
    async fn delete(&self, slug: &str) -> Result<(), RepoError>;
}
