//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{Intro, Post};

use super::{content_section, resource};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub intro_question: Option<String>,
    pub intro_hook: Option<String>,
    pub summary_points: Vec<String>,
    pub impact_points: Vec<String>,
    pub insight_points: Vec<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::content_section::Entity")]
    ContentSection,
    #[sea_orm(has_many = "super::resource::Entity")]
    Resource,
}

impl Related<super::content_section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentSection.def()
    }
}

impl Related<super::resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resource.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain aggregate from the parent row and its (ordered) children.
    pub fn into_domain(
        self,
        sections: Vec<content_section::Model>,
        resources: Vec<resource::Model>,
    ) -> Post {
        let intro = match (self.intro_question, self.intro_hook) {
            (Some(question), Some(hook)) => Some(Intro { question, hook }),
            _ => None,
        };

        Post {
            id: self.id,
            slug: self.slug,
            title: self.title,
            content: self.content,
            description: self.description,
            intro,
            summary_points: self.summary_points,
            sections: sections.into_iter().map(Into::into).collect(),
            impact_points: self.impact_points,
            insight_points: self.insight_points,
            resources: resources.into_iter().map(Into::into).collect(),
            tags: self.tags,
            is_published: self.is_published,
            published_at: self.published_at.map(Into::into),
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

/// Conversion from the domain Post to the parent-row ActiveModel (children are inserted separately).
impl From<&Post> for ActiveModel {
    fn from(post: &Post) -> Self {
        let (intro_question, intro_hook) = match &post.intro {
            Some(intro) => (Some(intro.question.clone()), Some(intro.hook.clone())),
            None => (None, None),
        };

        Self {
            id: Set(post.id),
            slug: Set(post.slug.clone()),
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            description: Set(post.description.clone()),
            intro_question: Set(intro_question),
            intro_hook: Set(intro_hook),
            summary_points: Set(post.summary_points.clone()),
            impact_points: Set(post.impact_points.clone()),
            insight_points: Set(post.insight_points.clone()),
            tags: Set(post.tags.clone()),
            is_published: Set(post.is_published),
            published_at: Set(post.published_at.map(Into::into)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
