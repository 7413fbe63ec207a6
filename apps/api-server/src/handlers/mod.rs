//! HTTP handlers and route configuration.

mod health;
mod posts;


use actix_web::{HttpRequest, ResponseError, error, web};

use crate::middleware::{ApiKeyGate, ApiKeyMiddleware, AppError};

/// Largest accepted JSON body.
const JSON_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, gate: ApiKeyGate) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                // Public routes
                .route("/posts", web::get().to(posts::list_posts))
                .route("/posts/{slug}", web::get().to(posts::get_post))
                // Admin routes
                .service(
                    web::scope("/admin")
                        .wrap(ApiKeyMiddleware::new(gate))
                        .route("/posts", web::post().to(posts::create_post))
                        .route("/posts/{slug}", web::put().to(posts::update_post))
                        .route("/posts/{slug}", web::delete().to(posts::delete_post)),
                ),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req: &HttpRequest| {
            let response = AppError::BadRequest(format!("Invalid request body: {err}")).error_response();
            error::InternalError::from_response(err, response).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        let response = AppError::BadRequest(format!("Invalid query string: {err}")).error_response();
        error::InternalError::from_response(err, response).into()
    })
}
