//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{NewPost, Pagination, PostPatch};
use blog_shared::{DeletedResponse, ListPostsQuery};

use crate::middleware::AppResult;
use crate::state::AppState;

/// GET /api/v1/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = if query.is_offset_based() {
        Pagination::offset(query.limit, query.offset)
    } else {
        Pagination::page(query.page, query.page_size)
    };

    let posts = state.posts.list(page).await?;
    tracing::debug!(
        limit = page.limit,
        offset = page.offset,
        count = posts.len(),
        "Listed published posts"
    );

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/v1/posts/{slug}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_slug(&path).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/v1/admin/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(body.into_inner()).await?;
    tracing::info!(slug = %post.slug, published = post.is_published, "Created post");

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/v1/admin/posts/{slug}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostPatch>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let post = state.posts.update(&slug, body.into_inner()).await?;
    tracing::info!(slug = %slug, "Updated post");

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/v1/admin/posts/{slug}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    state.posts.delete(&slug).await?;
    tracing::info!(slug = %slug, "Deleted post");

    Ok(HttpResponse::Ok().json(DeletedResponse::new(slug)))
}
