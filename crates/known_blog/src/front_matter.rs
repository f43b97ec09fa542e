//! Front matter parsing for blog posts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BlogError;
use crate::post::BlogPost;

const FENCE: &str = "---";

/// Metadata block at the top of a post. All three fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub slug: String,
    pub title: String,
    pub summary: String,
}

/// Splits `content` into its YAML block and the body that follows.
///
/// Returns `None` unless the first line is `---` and a closing `---` line exists.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix(FENCE)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Checks that `slug` is one URL path segment, usable both as `/blog/{slug}`
/// and as a file name inside the output directory.
fn check_slug(slug: &str) -> Result<(), String> {
    if slug.trim().is_empty() {
        return Err("slug must not be empty".to_string());
    }
    if slug == "." || slug == ".." {
        return Err(format!("slug '{}' is not a valid path segment", slug));
    }
    if let Some(c) = slug
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(format!("slug '{}' must not contain {:?}", slug, c));
    }
    Ok(())
}

/// Parses one post file.
///
/// `path` is only used for error messages.
pub fn parse_post(path: &Path, content: &str) -> Result<BlogPost, BlogError> {
    let (yaml, body) = split_front_matter(content).ok_or_else(|| BlogError::MissingFrontMatter {
        path: path.to_path_buf(),
    })?;

    let front_matter: FrontMatter =
        serde_yaml::from_str(yaml).map_err(|e| BlogError::InvalidFrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    check_slug(&front_matter.slug).map_err(|message| BlogError::InvalidFrontMatter {
        path: path.to_path_buf(),
        message,
    })?;

    Ok(BlogPost {
        front_matter,
        body: body.trim_start_matches(['\r', '\n']).to_string(),
    })
}
