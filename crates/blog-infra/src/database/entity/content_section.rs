//! Content section entity - ordered child rows of a post.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::ContentSection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "content_sections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    pub display_order: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub points: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContentSection {
    fn from(model: Model) -> Self {
        Self {
            title: model.title,
            content: model.content,
            points: model.points,
            examples: model.examples,
        }
    }
}

/// Build the rows for a post's sections, numbering them in list order.
pub fn active_models(post_id: Uuid, sections: &[ContentSection]) -> Vec<ActiveModel> {
    sections
        .iter()
        .enumerate()
        .map(|(position, section)| ActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(post_id),
            display_order: Set(position as i32),
            title: Set(section.title.clone()),
            content: Set(section.content.clone()),
            points: Set(section.points.clone()),
            examples: Set(section.examples.clone()),
        })
        .collect()
}
