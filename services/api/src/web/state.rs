//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use known_blog::{PostPage, PostSummary, StaticBlog};
use known_core::ports::DatabaseService;
use std::sync::Arc;
use tokio::sync::RwLock;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
    pub blog: Arc<RwLock<BlogState>>,
}

impl AppState {
    /// Creates state whose blog is still being built.
    pub fn new(db: Arc<dyn DatabaseService>, config: Arc<Config>) -> Self {
        Self {
            db,
            config,
            blog: Arc::new(RwLock::new(BlogState::Building)),
        }
    }
}

//=========================================================================================
// BlogState (Static Route Set)
//=========================================================================================

/// The blog as seen by request handlers.
#[derive(Debug, Default)]
pub enum BlogState {
    /// The route set is still being built; every lookup is `Loading`.
    #[default]
    Building,
    Built(StaticBlog),
}

impl BlogState {
    pub fn page(&self, slug: &str) -> PostPage {
        match self {
            BlogState::Building => PostPage::Loading,
            BlogState::Built(blog) => blog.page(slug),
        }
    }

    /// Post index, or `None` while building.
    pub fn summaries(&self) -> Option<Vec<PostSummary>> {
        match self {
            BlogState::Building => None,
            BlogState::Built(blog) => Some(blog.summaries()),
        }
    }
}
