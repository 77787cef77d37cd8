//! # rf-api Handlers
//!
//! Thin request handlers: bind the payload, call the service, map the
//! error kind to an HTTP status. No domain logic lives here.

use actix_web::{web, HttpResponse, Responder};
use rf_core::error::AppError;
use rf_core::models::{Forum, PageQuery, PostDraft, SortMode, Thread, User, UserPatch};
use rf_services::{ForumService, Related};
use serde::Deserialize;
use serde_json::json;

/// State shared across all actix workers.
pub struct AppState {
    pub forum: ForumService,
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = json!({ "message": err.to_string() });
    match err {
        AppError::ThreadNotFoundById(_)
        | AppError::ThreadNotFoundBySlug(_)
        | AppError::NoAuthorPost(_)
        | AppError::NotFound(..) => HttpResponse::NotFound().json(body),
        AppError::OtherThread | AppError::Conflict(_) | AppError::AlreadyExists(_) => {
            HttpResponse::Conflict().json(body)
        }
        AppError::ConstraintViolation(_) | AppError::Internal(_) => {
            tracing::error!(error = %err, "request failed");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

// ── Users ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct NewUserBody {
    pub fullname: String,
    pub email: String,
    #[serde(default)]
    pub about: String,
}

pub async fn create_user(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NewUserBody>,
) -> impl Responder {
    let body = body.into_inner();
    let user = User {
        nickname: path.into_inner(),
        fullname: body.fullname,
        email: body.email,
        about: body.about,
    };
    match data.forum.create_user(&user).await {
        Ok(user) => HttpResponse::Created().json(user),
        Err(err) => error_response(&err),
    }
}

pub async fn get_profile(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.forum.get_user(&path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => error_response(&err),
    }
}

pub async fn update_profile(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UserPatch>,
) -> impl Responder {
    match data.forum.update_user(&path.into_inner(), &body).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => error_response(&err),
    }
}

// ── Forums & threads ────────────────────────────────────────────────────────

pub async fn create_forum(data: web::Data<AppState>, body: web::Json<Forum>) -> impl Responder {
    match data.forum.create_forum(&body).await {
        Ok(forum) => HttpResponse::Created().json(forum),
        Err(err) => error_response(&err),
    }
}

pub async fn forum_details(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.forum.get_forum(&path.into_inner()).await {
        Ok(forum) => HttpResponse::Ok().json(forum),
        Err(err) => error_response(&err),
    }
}

pub async fn create_thread(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Thread>,
) -> impl Responder {
    match data.forum.create_thread(&path.into_inner(), &body).await {
        Ok(thread) => HttpResponse::Created().json(thread),
        Err(err) => error_response(&err),
    }
}

// ── Posts ───────────────────────────────────────────────────────────────────

pub async fn create_posts(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Vec<PostDraft>>,
) -> impl Responder {
    match data.forum.create_posts(&body, &path.into_inner()).await {
        Ok(posts) => HttpResponse::Created().json(posts),
        Err(err) => error_response(&err),
    }
}

#[derive(Deserialize)]
pub struct PostsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub since: Option<i64>,
    #[serde(default)]
    pub desc: bool,
    #[serde(default)]
    pub sort: String,
}

fn default_limit() -> i64 {
    100
}

pub async fn thread_posts(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PostsQuery>,
) -> impl Responder {
    let page = PageQuery {
        limit: query.limit,
        since: query.since,
        desc: query.desc,
    };
    let sort = SortMode::parse(&query.sort);
    match data.forum.thread_posts(&path.into_inner(), sort, page).await {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(err) => error_response(&err),
    }
}

#[derive(Deserialize)]
pub struct RelatedQuery {
    #[serde(default)]
    pub related: String,
}

pub async fn post_details(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<RelatedQuery>,
) -> impl Responder {
    let related = Related::parse(&query.related);
    match data.forum.get_post_related(path.into_inner(), related).await {
        Ok(full) => HttpResponse::Ok().json(full),
        Err(err) => error_response(&err),
    }
}

#[derive(Deserialize)]
pub struct UpdatePostBody {
    #[serde(default)]
    pub message: String,
}

pub async fn update_post(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePostBody>,
) -> impl Responder {
    match data.forum.update_post(path.into_inner(), &body.message).await {
        Ok(post) => HttpResponse::Ok().json(post),
        Err(err) => error_response(&err),
    }
}
