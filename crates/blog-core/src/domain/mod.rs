//! Domain entities - the core business objects.

mod field_update;
mod pagination;
mod post;
pub mod slug;

pub use field_update::FieldUpdate;
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Pagination};
pub use post::{
    ContentSection, Intro, MAX_CONTENT_BYTES, NewPost, Post, PostPatch, Resource,
};
