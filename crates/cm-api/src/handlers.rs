//! # cm-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use askama::Template;
use chrono::Utc;
use cm_core::error::AppError;
use cm_core::models::{NewPost, Session, User};
use cm_core::traits::{AuthProvider, ForumRepo};
use cm_ui::{CommunityTemplate, IndexTemplate, PostTemplate};
use serde::Deserialize;

use crate::error::ApiResult;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "commons_session";

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: Box<dyn ForumRepo>,
    pub auth: Box<dyn AuthProvider>,
}

/// Login/registration form payload.
#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Create-post form payload.
#[derive(Deserialize)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

/// Resolves the session cookie to its user, if any.
async fn current_user(state: &AppState, req: &HttpRequest) -> ApiResult<Option<User>> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(None);
    };
    Ok(state.repo.get_session_user(cookie.value()).await?)
}

fn render<T: Template>(template: T) -> ApiResult<HttpResponse> {
    let html = template
        .render()
        .map_err(|e| AppError::Internal(format!("template rendering failed: {e}")))?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.to_string()))
        .finish()
}

/// Renders the index: all communities, plus auth forms when signed out.
pub async fn index(state: web::Data<AppState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let user = current_user(&state, &req).await?;
    let communities = state.repo.list_communities().await?;

    render(IndexTemplate {
        title: "commons",
        communities: &communities,
        current_user: user.as_ref(),
    })
}

/// GET on the form-action endpoints just returns to the index.
pub async fn back_to_index() -> HttpResponse {
    see_other("/")
}

/// Creates an account and signs the new user in.
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let username = form.username.trim().to_string();

    if username.is_empty() || username.len() > 32 {
        return Err(AppError::Validation("username must be 1-32 characters".to_string()).into());
    }
    if form.password.chars().count() < 8 {
        return Err(
            AppError::Validation("password must be at least 8 characters".to_string()).into(),
        );
    }
    if state.repo.get_user_by_name(&username).await?.is_some() {
        return Err(AppError::Conflict(format!("username {username} is taken")).into());
    }

    let hash = state.auth.hash_password(&form.password)?;
    let user = state.repo.create_user(&username, &hash).await?;
    log::info!("registered user {} ({})", user.username, user.id);

    open_session(&state, user.id).await
}

/// Verifies credentials and opens a session.
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();

    let user = state
        .repo
        .get_user_by_name(form.username.trim())
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid username or password".to_string()))?;

    if !state.auth.verify_password(&form.password, &user.password_hash) {
        return Err(AppError::Unauthorized("invalid username or password".to_string()).into());
    }

    open_session(&state, user.id).await
}

/// Deletes the session row and expires the cookie.
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.repo.delete_session(cookie.value()).await?;
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    Ok(HttpResponse::SeeOther()
        .cookie(removal)
        .insert_header(("Location", "/"))
        .finish())
}

/// Opens a fresh session for `user_id` and redirects home with the cookie set.
async fn open_session(state: &AppState, user_id: i64) -> ApiResult<HttpResponse> {
    let token = state.auth.generate_session_token();
    state
        .repo
        .create_session(Session {
            token: token.clone(),
            user_id,
            created_at: Utc::now(),
        })
        .await?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    Ok(HttpResponse::SeeOther()
        .cookie(cookie)
        .insert_header(("Location", "/"))
        .finish())
}

/// Renders a single post with its community context.
pub async fn show_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let user = current_user(&state, &req).await?;

    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::NotFound("post".to_string(), id.to_string()))?;
    let community = state
        .repo
        .get_community(post.community_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("community".to_string(), post.community_id.to_string())
        })?;

    render(PostTemplate {
        title: post.title.as_str(),
        community: &community,
        post: &post,
        current_user: user.as_ref(),
    })
}

/// Renders a community page: description, posts newest first,
/// and the create-post form when signed in.
pub async fn show_community(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let user = current_user(&state, &req).await?;

    let community = state
        .repo
        .get_community(id)
        .await?
        .ok_or_else(|| AppError::NotFound("community".to_string(), id.to_string()))?;
    let posts = state.repo.list_posts(community.id).await?;

    render(CommunityTemplate {
        title: community.name.as_str(),
        community: &community,
        posts: &posts,
        current_user: user.as_ref(),
    })
}

/// Creates a post in a community. Requires a valid session.
pub async fn create_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let community_id = path.into_inner();

    let user = current_user(&state, &req)
        .await?
        .ok_or_else(|| AppError::Unauthorized("sign in to post".to_string()))?;

    let community = state
        .repo
        .get_community(community_id)
        .await?
        .ok_or_else(|| AppError::NotFound("community".to_string(), community_id.to_string()))?;

    let form = form.into_inner();
    let title = form.title.trim().to_string();
    if title.is_empty() || form.body.trim().is_empty() {
        return Err(AppError::Validation("title and body must not be empty".to_string()).into());
    }

    let id = state
        .repo
        .create_post(NewPost {
            community_id: community.id,
            author_id: user.id,
            title,
            body: sanitize_body(form.body.trim()),
        })
        .await?;

    log::info!(
        "user {} created post {} in community {}",
        user.id,
        id,
        community.id
    );

    Ok(see_other(&format!("/posts/{id}")))
}

/// Basic sanitization and quote-line markup.
fn sanitize_body(raw: &str) -> String {
    // Escape HTML to prevent XSS
    let escaped = html_escape::encode_safe(raw).to_string();

    // Lines starting with '>' render as quotes
    escaped
        .lines()
        .map(|line| {
            if line.starts_with("&gt;") {
                format!("<span class=\"quote\">{}</span>", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("<br />")
}
