//! SeaORM entities for the blog schema.

pub mod content_section;
pub mod post;
pub mod resource;
