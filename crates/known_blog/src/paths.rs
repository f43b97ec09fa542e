//! Static path generation.
//!
//! Reads the content directory once and produces the closed set of blog
//! routes. Fallback is always disabled: a slug outside the set is not found.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::BlogError;
use crate::front_matter::parse_post;
use crate::post::{BlogPost, PostPage, PostSummary, RenderedPost};

/// The route set produced at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaticPaths {
    pub paths: BTreeSet<String>,
    pub fallback: bool,
}

impl StaticPaths {
    pub fn contains(&self, slug: &str) -> bool {
        self.paths.contains(slug)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Lists the regular files of `dir`, sorted by file name.
fn content_files(dir: &Path) -> Result<Vec<PathBuf>, BlogError> {
    let read_dir_err = |source: std::io::Error| BlogError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        if path.is_dir() {
            debug!("Skipping directory {}", path.display());
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Reads and parses every post in `dir`.
fn load_posts(dir: &Path) -> Result<Vec<BlogPost>, BlogError> {
    content_files(dir)?
        .into_iter()
        .map(|path| {
            let content = fs::read_to_string(&path).map_err(|source| BlogError::ReadFile {
                path: path.clone(),
                source,
            })?;
            parse_post(&path, &content)
        })
        .collect()
}

/// Builds the route set for the posts in `dir`.
///
/// # Errors
///
/// Fails if the directory cannot be read or any file lacks valid front
/// matter. No partial set is ever returned.
pub fn build_static_paths(dir: &Path) -> Result<StaticPaths, BlogError> {
    let posts = load_posts(dir)?;
    Ok(StaticPaths {
        paths: posts.iter().map(|p| p.slug().to_string()).collect(),
        fallback: false,
    })
}

/// Every post pre-rendered and keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct StaticBlog {
    paths: StaticPaths,
    posts: BTreeMap<String, RenderedPost>,
}

impl StaticBlog {
    /// Parses and pre-renders every post in `dir`.
    ///
    /// Slugs are assumed unique. If two files share a slug, the one later in
    /// file-name order wins and a warning is logged.
    pub fn build(dir: &Path) -> Result<Self, BlogError> {
        let posts = load_posts(dir)?;

        let mut rendered = BTreeMap::new();
        for post in &posts {
            if rendered.insert(post.slug().to_string(), post.render()).is_some() {
                warn!("Duplicate blog slug '{}', keeping the last one", post.slug());
            }
        }

        let paths = StaticPaths {
            paths: rendered.keys().cloned().collect(),
            fallback: false,
        };
        info!("Built {} blog paths from {}", paths.len(), dir.display());

        Ok(Self {
            paths,
            posts: rendered,
        })
    }

    pub fn paths(&self) -> &StaticPaths {
        &self.paths
    }

    /// Looks up a slug. Anything outside the built set is `NotFound`.
    pub fn page(&self, slug: &str) -> PostPage {
        match self.posts.get(slug) {
            Some(post) => PostPage::Ready(post.clone()),
            None => PostPage::NotFound,
        }
    }

    pub fn summaries(&self) -> Vec<PostSummary> {
        self.posts.values().map(PostSummary::from).collect()
    }

    /// Writes `static-paths.json` plus one `<slug>.html` fragment per post
    /// into `out_dir`, creating it if needed.
    pub fn write_to(&self, out_dir: &Path) -> Result<(), BlogError> {
        fs::create_dir_all(out_dir)?;
        let manifest = serde_json::to_string_pretty(&self.paths)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(out_dir.join("static-paths.json"), manifest)?;

        for post in self.posts.values() {
            fs::write(out_dir.join(format!("{}.html", post.slug)), &post.html)?;
        }
        Ok(())
    }
}
