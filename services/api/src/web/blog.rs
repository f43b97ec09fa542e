//! services/api/src/web/blog.rs
//!
//! Blog endpoints and the startup build of the static route set.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use known_blog::{PostPage, PostSummary, StaticBlog};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::web::state::{AppState, BlogState};

#[derive(Serialize)]
struct BlogIndex {
    posts: Vec<PostSummary>,
}

/// Builds the blog from `posts_path` on a blocking thread and publishes it
/// into `state` once done.
///
/// The returned task fails if any post is malformed; the blog then stays in
/// `Building` and the caller is expected to abort.
pub fn spawn_blog_build(state: Arc<AppState>, posts_path: PathBuf) -> JoinHandle<Result<(), ApiError>> {
    tokio::spawn(async move {
        info!("Building blog from {}", posts_path.display());
        let blog = tokio::task::spawn_blocking(move || StaticBlog::build(&posts_path))
            .await
            .map_err(|e| ApiError::Internal(format!("Blog build task panicked: {}", e)))??;

        info!("Blog ready with {} posts", blog.paths().len());
        *state.blog.write().await = BlogState::Built(blog);
        Ok(())
    })
}

/// GET /blog - Index of every post
pub async fn blog_index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.blog.read().await.summaries() {
        Some(posts) => (StatusCode::OK, Json(BlogIndex { posts })).into_response(),
        None => (StatusCode::ACCEPTED, Json(PostPage::Loading)).into_response(),
    }
}

/// GET /blog/{slug} - One pre-rendered post
///
/// 200 with the post, 202 while the blog is still building, 404 for any
/// slug outside the built route set.
pub async fn blog_post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let page = state.blog.read().await.page(&slug);
    let status = match &page {
        PostPage::Ready(_) => StatusCode::OK,
        PostPage::Loading => StatusCode::ACCEPTED,
        PostPage::NotFound => {
            debug!("Blog slug not found: {}", slug);
            StatusCode::NOT_FOUND
        }
    };
    (status, Json(page))
}
