//! # rf-api
//!
//! The web routing and orchestration layer for Rusty-Forum.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the forum API.
///
/// Scoped under `/api` so the main binary can mount it next to other
/// surfaces (health checks, static assets) without clashes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/user/{nickname}/create", web::post().to(handlers::create_user))
            .route("/user/{nickname}/profile", web::get().to(handlers::get_profile))
            .route("/user/{nickname}/profile", web::post().to(handlers::update_profile))
            .route("/forum/create", web::post().to(handlers::create_forum))
            .route("/forum/{slug}/details", web::get().to(handlers::forum_details))
            .route("/forum/{slug}/create", web::post().to(handlers::create_thread))
            .route("/thread/{slug_or_id}/create", web::post().to(handlers::create_posts))
            .route("/thread/{slug_or_id}/posts", web::get().to(handlers::thread_posts))
            .route("/post/{id}/details", web::get().to(handlers::post_details))
            .route("/post/{id}/details", web::post().to(handlers::update_post)),
    );
}
