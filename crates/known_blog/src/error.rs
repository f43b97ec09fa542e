//! Error type for blog builds.

use std::path::PathBuf;

/// Failure while building or writing the static blog.
///
/// Every variant is fatal for the build.
#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    /// The content directory could not be listed.
    #[error("Failed to read content directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A content file could not be read as UTF-8 text.
    #[error("Failed to read post {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not start with a `---` fenced front matter block.
    #[error("Post {} has no front matter block", path.display())]
    MissingFrontMatter { path: PathBuf },

    /// The front matter is not valid YAML or lacks a required field.
    #[error("Invalid front matter in {}: {message}", path.display())]
    InvalidFrontMatter { path: PathBuf, message: String },

    /// Writing build output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
