//! PostgreSQL post repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{ContentSection, FieldUpdate, NewPost, Pagination, Post, PostPatch, Resource};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::content_section::{self, Entity as SectionEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::resource::{self, Entity as ResourceEntity};

type Children = (
    HashMap<Uuid, Vec<content_section::Model>>,
    HashMap<Uuid, Vec<resource::Model>>,
);

/// PostgreSQL post repository.
///
/// Parent and child rows are always written inside one transaction. Partial
/// updates are merged by the database (`UPDATE ... SET` only for supplied
/// columns) so concurrent writers never overwrite each other with stale reads.
///
/// Every timestamp comes from the application clock, on insert and on update
/// alike, so `published_at` can never precede `created_at`.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Hands the connection back so tests can read the mock transaction log.
    #[cfg(test)]
    pub(super) fn into_connection(self) -> DbConn {
        self.db
    }

    /// Load sections and resources for a batch of posts, one query per table.
    async fn load_children<C>(db: &C, post_ids: &[Uuid]) -> Result<Children, RepoError>
    where
        C: ConnectionTrait,
    {
        let sections = SectionEntity::find()
            .filter(content_section::Column::PostId.is_in(post_ids.iter().copied()))
            .order_by_asc(content_section::Column::DisplayOrder)
            .all(db)
            .await
            .map_err(query_err)?;

        let resources = ResourceEntity::find()
            .filter(resource::Column::PostId.is_in(post_ids.iter().copied()))
            .order_by_asc(resource::Column::DisplayOrder)
            .all(db)
            .await
            .map_err(query_err)?;

        let mut sections_by_post: HashMap<Uuid, Vec<content_section::Model>> = HashMap::new();
        for section in sections {
            sections_by_post.entry(section.post_id).or_default().push(section);
        }

        let mut resources_by_post: HashMap<Uuid, Vec<resource::Model>> = HashMap::new();
        for resource in resources {
            resources_by_post.entry(resource.post_id).or_default().push(resource);
        }

        Ok((sections_by_post, resources_by_post))
    }

    async fn insert_sections<C>(
        db: &C,
        post_id: Uuid,
        sections: &[ContentSection],
    ) -> Result<(), RepoError>
    where
        C: ConnectionTrait,
    {
        if sections.is_empty() {
            return Ok(());
        }

        SectionEntity::insert_many(content_section::active_models(post_id, sections))
            .exec_without_returning(db)
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn insert_resources<C>(
        db: &C,
        post_id: Uuid,
        resources: &[Resource],
    ) -> Result<(), RepoError>
    where
        C: ConnectionTrait,
    {
        if resources.is_empty() {
            return Ok(());
        }

        ResourceEntity::insert_many(resource::active_models(post_id, resources))
            .exec_without_returning(db)
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn reload(&self, slug: &str) -> Result<Post, RepoError> {
        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| RepoError::Query(format!("post '{slug}' missing after commit")))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, slug: &str, input: NewPost) -> Result<Post, RepoError> {
        let post = Post::new(slug.to_string(), input);

        // Rolled back on drop if any step below returns early.
        let txn = self.db.begin().await.map_err(query_err)?;

        PostEntity::insert(post::ActiveModel::from(&post))
            .exec_without_returning(&txn)
            .await
            .map_err(write_err)?;
        Self::insert_sections(&txn, post.id, &post.sections).await?;
        Self::insert_resources(&txn, post.id, &post.resources).await?;

        txn.commit().await.map_err(query_err)?;
        tracing::info!(slug = %slug, post_id = %post.id, "Post created");

        self.reload(slug).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug = %slug, "Finding post by slug");

        let Some(row) = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let (mut sections, mut resources) = Self::load_children(&self.db, &[row.id]).await?;
        let id = row.id;

        Ok(Some(row.into_domain(
            sections.remove(&id).unwrap_or_default(),
            resources.remove(&id).unwrap_or_default(),
        )))
    }

    async fn list_published(&self, page: Pagination) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .filter(post::Column::IsPublished.eq(true))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let (mut sections, mut resources) = Self::load_children(&self.db, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_domain(
                    sections.remove(&id).unwrap_or_default(),
                    resources.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn update(&self, slug: &str, patch: PostPatch) -> Result<Post, RepoError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let mut query = PostEntity::update_many()
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Slug.eq(slug));

        if let FieldUpdate::Set(title) = patch.title {
            query = query.col_expr(post::Column::Title, Expr::value(title.trim().to_string()));
        }
        if let FieldUpdate::Set(content) = patch.content {
            query = query.col_expr(post::Column::Content, Expr::value(content));
        }
        if let Some(description) = patch.description.into_change() {
            query = query.col_expr(post::Column::Description, Expr::value(description));
        }
        if let Some(intro) = patch.intro.into_change() {
            let (question, hook) = match intro {
                Some(intro) => (Some(intro.question), Some(intro.hook)),
                None => (None, None),
            };
            query = query
                .col_expr(post::Column::IntroQuestion, Expr::value(question))
                .col_expr(post::Column::IntroHook, Expr::value(hook));
        }

        let lists = [
            (post::Column::SummaryPoints, patch.summary_points),
            (post::Column::ImpactPoints, patch.impact_points),
            (post::Column::InsightPoints, patch.insight_points),
            (post::Column::Tags, patch.tags),
        ];
        for (column, change) in lists {
            if let Some(values) = change.into_change() {
                query = query.col_expr(column, Expr::value(values.unwrap_or_default()));
            }
        }

        if let FieldUpdate::Set(published) = patch.is_published {
            query = query.col_expr(post::Column::IsPublished, Expr::value(published));
            if published {
                // First publish wins; later ones keep the stamp.
                let stamp: SimpleExpr = Func::coalesce([
                    Expr::col(post::Column::PublishedAt).into(),
                    Expr::value(now),
                ])
                .into();
                query = query.col_expr(post::Column::PublishedAt, stamp);
            }
        }

        // Rolled back on drop if any step below returns early.
        let txn = self.db.begin().await.map_err(query_err)?;

        let row = query
            .exec_with_returning(&txn)
            .await
            .map_err(write_err)?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)?;

        if let Some(sections) = patch.sections.into_change() {
            SectionEntity::delete_many()
                .filter(content_section::Column::PostId.eq(row.id))
                .exec(&txn)
                .await
                .map_err(query_err)?;
            Self::insert_sections(&txn, row.id, &sections.unwrap_or_default()).await?;
        }

        if let Some(resources) = patch.resources.into_change() {
            ResourceEntity::delete_many()
                .filter(resource::Column::PostId.eq(row.id))
                .exec(&txn)
                .await
                .map_err(query_err)?;
            Self::insert_resources(&txn, row.id, &resources.unwrap_or_default()).await?;
        }

        txn.commit().await.map_err(query_err)?;
        tracing::info!(slug = %slug, post_id = %row.id, "Post updated");

        self.reload(slug).await
    }

    async fn delete(&self, slug: &str) -> Result<(), RepoError> {
        // Child rows go with the parent via ON DELETE CASCADE.
        let result = PostEntity::delete_many()
            .filter(post::Column::Slug.eq(slug))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::info!(slug = %slug, "Post deleted");
        Ok(())
    }
}

fn query_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

fn write_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepoError::Constraint(detail),
        _ => query_err(err),
    }
}
