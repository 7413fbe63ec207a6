//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Query string accepted by `GET /api/v1/posts`.
///
/// Either page-based (`page`, `page_size`) or offset-based (`limit`, `offset`).
/// Offset mode wins when `limit` or `offset` is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListPostsQuery {
    pub fn is_offset_based(&self) -> bool {
        self.limit.is_some() || self.offset.is_some()
    }
}

/// Acknowledgement returned by `DELETE /api/v1/admin/posts/{slug}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub slug: String,
    pub deleted: bool,
}

impl DeletedResponse {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            deleted: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_mode_selection() {
        let page: ListPostsQuery = serde_json::from_str(r#"{"page": 2, "page_size": 5}"#).unwrap();
        assert!(!page.is_offset_based());

        let offset: ListPostsQuery = serde_json::from_str(r#"{"offset": 20}"#).unwrap();
        assert!(offset.is_offset_based());
    }

    #[test]
    fn test_deleted_response_shape() {
        let json = serde_json::to_value(DeletedResponse::new("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"slug": "hello", "deleted": true}));
    }
}
