//! services/api/src/bin/blog.rs
//!
//! Build-time step for the blog: reads every post under `POSTS_PATH`,
//! pre-renders it, and writes the static route manifest and HTML fragments
//! to the directory given as the first argument (default `out/blog`).
//!
//! Any malformed post fails the whole build with a non-zero exit.

use api_lib::{config::Config, error::ApiError};
use known_blog::StaticBlog;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), ApiError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let posts_path = Config::posts_path_from_env();
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("out/blog"));

    let blog = StaticBlog::build(&posts_path)?;
    blog.write_to(&out_dir)?;

    for slug in &blog.paths().paths {
        info!("/blog/{}", slug);
    }
    info!(
        "Wrote {} static paths to {} (fallback: {})",
        blog.paths().len(),
        out_dir.display(),
        blog.paths().fallback
    );
    Ok(())
}
