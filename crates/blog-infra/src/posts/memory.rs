//! In-memory post repository - used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Pagination, Post, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

/// In-memory post repository backed by an insertion-ordered `Vec` behind an async `RwLock`.
///
/// Mirrors the PostgreSQL semantics (unique slugs, publish stamping, newest-first
/// listing). Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, slug: &str, input: NewPost) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        if posts.iter().any(|p| p.slug == slug) {
            return Err(RepoError::Constraint(format!("slug '{slug}' already exists")));
        }

        let post = Post::new(slug.to_string(), input);
        posts.push(post.clone());

        tracing::debug!(slug = %slug, "Post stored in memory");
        Ok(post)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list_published(&self, page: Pagination) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;

        // Reverse first so equal timestamps still list the later insert first.
        let mut published: Vec<&Post> = posts.iter().rev().filter(|p| p.is_published).collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(published
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, slug: &str, patch: PostPatch) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        let post = posts
            .iter_mut()
            .find(|p| p.slug == slug)
            .ok_or(RepoError::NotFound)?;
        post.apply_patch(patch, Utc::now());

        Ok(post.clone())
    }

    async fn delete(&self, slug: &str) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;

        let before = posts.len();
        posts.retain(|p| p.slug != slug);

        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blog_core::PostStore;
    use blog_core::domain::{ContentSection, FieldUpdate, Resource};
    use blog_core::error::DomainError;

    use super::*;

    fn store() -> PostStore {
        PostStore::new(Arc::new(InMemoryPostRepository::new()))
    }

    fn input(title: &str, published: bool) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("Content of {title}"),
            tags: vec!["rust".to_string(), "web".to_string()],
            is_published: published,
            ..Default::default()
        }
    }

    fn section(title: &str) -> ContentSection {
        ContentSection {
            title: title.to_string(),
            content: String::new(),
            points: vec![],
            examples: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_with_explicit_slug_then_fetch() {
        let store = store();
        let mut new = input("Hello", false);
        new.slug = Some("custom".to_string());

        let created = store.create(new).await.unwrap();
        let fetched = store.get_by_slug("custom").await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.title, "Hello");
    }

    #[tokio::test]
    async fn test_create_derives_slug_and_rejects_duplicates() {
        let store = store();

        let created = store.create(input("Hello, World!", true)).await.unwrap();
        assert_eq!(created.slug, "hello-world");

        let err = store.create(input("hello world", true)).await.unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_title_only_leaves_other_fields() {
        let store = store();
        let created = store.create(input("Original", false)).await.unwrap();

        let updated = store
            .update(
                "original",
                PostPatch {
                    title: FieldUpdate::Set("Updated".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Updated");
        assert_eq!(updated.slug, "original");
        assert_eq!(updated.content, created.content);
        assert_eq!(updated.tags, created.tags);
        assert_eq!(updated.is_published, created.is_published);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_publish_stamps_once() {
        let store = store();
        store.create(input("Draft", false)).await.unwrap();

        let publish = || PostPatch {
            is_published: FieldUpdate::Set(true),
            ..Default::default()
        };

        let first = store.update("draft", publish()).await.unwrap();
        let stamped = first.published_at.expect("published_at set on first publish");
        assert!(stamped <= Utc::now());

        let second = store.update("draft", publish()).await.unwrap();
        assert_eq!(second.published_at, Some(stamped));

        let unpublished = store
            .update(
                "draft",
                PostPatch {
                    is_published: FieldUpdate::Set(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!unpublished.is_published);
        assert_eq!(unpublished.published_at, Some(stamped));
    }

    #[tokio::test]
    async fn test_update_missing_slug_is_not_found() {
        let err = store()
            .update(
                "does-not-exist",
                PostPatch {
                    title: FieldUpdate::Set("x".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_clear_and_replace_collections() {
        let store = store();
        let mut new = input("With Children", true);
        new.description = Some("short".to_string());
        new.resources = vec![Resource {
            title: "Docs".to_string(),
            url: "https://docs.rs".to_string(),
            kind: "reference".to_string(),
        }];
        store.create(new).await.unwrap();

        let updated = store
            .update(
                "with-children",
                PostPatch {
                    description: FieldUpdate::Clear,
                    tags: FieldUpdate::Clear,
                    sections: FieldUpdate::Set(vec![section("One"), section("Two")]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, None);
        assert!(updated.tags.is_empty());
        assert_eq!(updated.sections.len(), 2);
        assert_eq!(updated.sections[0].title, "One");
        // Omitted collections are untouched.
        assert_eq!(updated.resources.len(), 1);
    }

    #[tokio::test]
    async fn test_list_only_published_newest_first() {
        let store = store();
        store.create(input("Old", true)).await.unwrap();
        store.create(input("Hidden", false)).await.unwrap();
        store.create(input("New", true)).await.unwrap();

        let posts = store.list(Pagination::default()).await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_list_page_size_clamp() {
        let store = store();
        for i in 0..55 {
            store.create(input(&format!("Post {i}"), true)).await.unwrap();
        }

        let default_page = store.list(Pagination::page(None, Some(0))).await.unwrap();
        assert_eq!(default_page.len(), 10);

        let clamped = store.list(Pagination::page(None, Some(1000))).await.unwrap();
        assert_eq!(clamped.len(), 50);

        let last_page = store.list(Pagination::page(Some(6), Some(10))).await.unwrap();
        assert_eq!(last_page.len(), 5);
        assert_eq!(last_page[4].slug, "post-0");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store();
        store.create(input("Gone", true)).await.unwrap();

        store.delete("gone").await.unwrap();

        assert!(matches!(
            store.get_by_slug("gone").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete("gone").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
