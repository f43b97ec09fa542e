pub mod app;
pub mod auth;
pub mod blog;
pub mod middleware;
pub mod rest;
pub mod router;
pub mod state;

// Re-exports used by the binaries that assemble the server.
pub use blog::spawn_blog_build;
pub use middleware::{load_session, require_auth};
pub use router::build_router;
pub use state::{AppState, BlogState};
