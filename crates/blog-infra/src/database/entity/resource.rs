//! Resource entity - links attached to a post.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::Resource;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    pub display_order: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub resource_type: String,
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

impl From<Model> for Resource {
    fn from(model: Model) -> Self {
        Self {
            title: model.title,
            url: model.url,
            kind: model.resource_type,
        }
    }
}

pub fn active_models(post_id: Uuid, resources: &[Resource]) -> Vec<ActiveModel> {
    resources
        .iter()
        .enumerate()
        .map(|(position, resource)| ActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(post_id),
            display_order: Set(position as i32),
            title: Set(resource.title.clone()),
            url: Set(resource.url.clone()),
            resource_type: Set(resource.kind.clone()),
        })
        .collect()
}
