//! Post store - validation and error mapping in front of a [`PostRepository`].

use std::sync::Arc;

use crate::domain::{NewPost, Pagination, Post, PostPatch};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Application service for posts. Cheap to clone.
#[derive(Clone)]
pub struct PostStore {
    repo: Arc<dyn PostRepository>,
}

impl PostStore {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        input.validate()?;
        let slug = input.resolve_slug()?;

        self.repo.create(&slug, input).await.map_err(|err| match err {
            RepoError::Constraint(_) => {
                DomainError::Duplicate(format!("a post with slug '{slug}' already exists"))
            }
            other => other.into(),
        })
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Post, DomainError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::post_not_found(slug))
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list_published(page).await?)
    }

    pub async fn update(&self, slug: &str, patch: PostPatch) -> Result<Post, DomainError> {
        patch.validate()?;

        if patch.is_empty() {
            return self.get_by_slug(slug).await;
        }

        self.repo
            .update(slug, patch)
            .await
            .map_err(|err| not_found_for(err, slug))
    }

    pub async fn delete(&self, slug: &str) -> Result<(), DomainError> {
        self.repo
            .delete(slug)
            .await
            .map_err(|err| not_found_for(err, slug))
    }
}

fn not_found_for(err: RepoError, slug: &str) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(slug),
        other => other.into(),
    }
}
