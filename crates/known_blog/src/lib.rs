//! Static blog builder.
//!
//! Posts live as Markdown files in one content directory, each starting with
//! a YAML front matter block:
//!
//! ```text
//! ---
//! slug: hello-world
//! title: Hello, world
//! summary: The first post.
//! ---
//!
//! Body in **Markdown**.
//! ```
//!
//! The crate provides:
//! - [`build_static_paths`] to enumerate the closed route set at build time
//! - [`StaticBlog`] holding every post pre-rendered to HTML, keyed by slug
//! - [`PostPage`] describing what to render for a requested slug
//!
//! Any content error aborts the whole build; there is no partial route set.

mod error;
mod front_matter;
mod paths;
mod post;

pub use error::BlogError;
pub use front_matter::{parse_post, FrontMatter};
pub use paths::{build_static_paths, StaticBlog, StaticPaths};
pub use post::{render_markdown, BlogPost, PostPage, PostSummary, RenderedPost, SITE_TITLE};
