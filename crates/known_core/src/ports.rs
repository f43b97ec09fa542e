//! crates/known_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! The resolver and the folder flow only ever talk to these traits, so the
//! core stays independent of Postgres and of the HTTP client in use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Doc, Folder, FolderSummary, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- User Management ---
    async fn create_user_with_email(
        &self,
        email: &str,
        hashed_password: &str,
        name: Option<&str>,
        image: Option<&str>,
    ) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User>;

    // --- Auth Methods ---
    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    /// Returns the owning user id, or `Unauthorized` if the session is
    /// unknown or expired.
    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    // --- Folders ---
    /// All folders owned by `owner_id`, oldest first.
    async fn get_folders(&self, owner_id: Uuid) -> PortResult<Vec<Folder>>;

    async fn create_folder(&self, owner_id: Uuid, name: &str) -> PortResult<Folder>;

    // --- Documents ---
    /// All documents in `folder_id`, oldest first. An unknown folder yields an empty set.
    async fn get_docs_by_folder(&self, folder_id: &str) -> PortResult<Vec<Doc>>;

    async fn create_doc(&self, owner_id: Uuid, folder_id: &str, name: &str) -> PortResult<Doc>;
}

/// The remote folder-creation endpoint, as seen from a client holding a
/// local folder list.
#[async_trait]
pub trait FolderApi: Send + Sync {
    /// Creates a folder named `name` and returns the record the server stored.
    async fn create_folder(&self, name: &str) -> PortResult<FolderSummary>;
}
