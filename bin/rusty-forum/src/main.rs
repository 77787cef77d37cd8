//! # Rusty-Forum Binary
//!
//! The entry point that assembles the application: SQLite-backed
//! repositories behind the core ports, the service layer on top, and the
//! actix HTTP surface in front.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use rf_api::handlers::AppState;
use rf_api::middleware;
use rf_db_sqlite::SqliteForumRepo;
use rf_services::ForumService;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:rusty_forum.db".into());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into());

    let repo = Arc::new(
        SqliteForumRepo::new(&database_url)
            .await
            .map_err(|err| anyhow::anyhow!("failed to open {database_url}: {err}"))?,
    );
    let state = web::Data::new(AppState {
        forum: ForumService::new(repo.clone(), repo.clone(), repo.clone(), repo),
    });

    tracing::info!(%bind_addr, %database_url, "rusty-forum starting");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::request_logger())
            .wrap(middleware::cors_policy())
            .configure(rf_api::configure_routes)
    })
    .bind(bind_addr.as_str())?
    .run()
    .await?;

    Ok(())
}
