//! In-memory `DatabaseService` for testing.
//!
//! Provides [`MockDatabase`] for unit and handler tests without Postgres.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Doc, Folder, User, UserCredentials};
use crate::ports::{DatabaseService, PortError, PortResult};

/// Mock database for testing.
///
/// Stores users, auth sessions, folders and documents in memory. Use the
/// builder methods to seed it, and [`MockDatabase::reads`] to assert how
/// many folder/document reads a code path performed.
///
/// # Example
///
/// ```ignore
/// let user_id = Uuid::new_v4();
/// let db = MockDatabase::new()
///     .with_folder(user_id, "f1", "Projects")
///     .with_doc(user_id, "f1", "d1", "Plan");
/// ```
#[derive(Debug, Default)]
pub struct MockDatabase {
    users: RwLock<Vec<(User, String)>>,
    auth_sessions: RwLock<HashMap<String, (Uuid, DateTime<Utc>)>>,
    folders: RwLock<Vec<Folder>>,
    docs: RwLock<Vec<Doc>>,
    reads: AtomicUsize,
    sessions_down: bool,
}

fn lock_poisoned() -> PortError {
    PortError::Unexpected("mock database lock poisoned".to_string())
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user with a pre-hashed password.
    pub fn with_user(self, user: User, hashed_password: &str) -> Self {
        if let Ok(mut users) = self.users.write() {
            users.push((user, hashed_password.to_string()));
        }
        self
    }

    /// Seeds a valid auth session.
    pub fn with_auth_session(self, session_id: &str, user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        if let Ok(mut sessions) = self.auth_sessions.write() {
            sessions.insert(session_id.to_string(), (user_id, expires_at));
        }
        self
    }

    pub fn with_folder(self, owner_id: Uuid, id: &str, name: &str) -> Self {
        if let Ok(mut folders) = self.folders.write() {
            folders.push(Folder {
                id: id.to_string(),
                name: name.to_string(),
                owner_id,
                created_at: Utc::now(),
            });
        }
        self
    }

    pub fn with_doc(self, owner_id: Uuid, folder_id: &str, id: &str, name: &str) -> Self {
        if let Ok(mut docs) = self.docs.write() {
            docs.push(Doc {
                id: id.to_string(),
                folder_id: folder_id.to_string(),
                owner_id,
                name: name.to_string(),
                content: String::new(),
                created_at: Utc::now(),
            });
        }
        self
    }

    /// Makes every session validation fail as if the database were unreachable.
    pub fn with_sessions_down(mut self) -> Self {
        self.sessions_down = true;
        self
    }

    /// Number of folder and document reads served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn has_auth_session(&self, session_id: &str) -> bool {
        self.auth_sessions
            .read()
            .map(|s| s.contains_key(session_id))
            .unwrap_or(false)
    }
}

#[async_trait]
impl DatabaseService for MockDatabase {
    async fn create_user_with_email(
        &self,
        email: &str,
        hashed_password: &str,
        name: Option<&str>,
        image: Option<&str>,
    ) -> PortResult<User> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;
        if users.iter().any(|(u, _)| u.email == email) {
            return Err(PortError::Unexpected(format!("Email {} already registered", email)));
        }
        let user = User {
            user_id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.map(str::to_string),
            image: image.map(str::to_string),
        };
        users.push((user.clone(), hashed_password.to_string()));
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;
        users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, hash)| UserCredentials {
                user_id: u.user_id,
                email: u.email.clone(),
                hashed_password: hash.clone(),
            })
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", email)))
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;
        users
            .iter()
            .find(|(u, _)| u.user_id == user_id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        let mut sessions = self.auth_sessions.write().map_err(|_| lock_poisoned())?;
        sessions.insert(session_id.to_string(), (user_id, expires_at));
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        if self.sessions_down {
            return Err(PortError::Unexpected("connection refused".to_string()));
        }
        let sessions = self.auth_sessions.read().map_err(|_| lock_poisoned())?;
        match sessions.get(session_id) {
            Some((user_id, expires_at)) if *expires_at > Utc::now() => Ok(*user_id),
            _ => Err(PortError::Unauthorized),
        }
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        let mut sessions = self.auth_sessions.write().map_err(|_| lock_poisoned())?;
        sessions.remove(session_id);
        Ok(())
    }

    async fn get_folders(&self, owner_id: Uuid) -> PortResult<Vec<Folder>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let folders = self.folders.read().map_err(|_| lock_poisoned())?;
        Ok(folders.iter().filter(|f| f.owner_id == owner_id).cloned().collect())
    }

    async fn create_folder(&self, owner_id: Uuid, name: &str) -> PortResult<Folder> {
        let folder = Folder {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            owner_id,
            created_at: Utc::now(),
        };
        let mut folders = self.folders.write().map_err(|_| lock_poisoned())?;
        folders.push(folder.clone());
        Ok(folder)
    }

    async fn get_docs_by_folder(&self, folder_id: &str) -> PortResult<Vec<Doc>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let docs = self.docs.read().map_err(|_| lock_poisoned())?;
        Ok(docs.iter().filter(|d| d.folder_id == folder_id).cloned().collect())
    }

    async fn create_doc(&self, owner_id: Uuid, folder_id: &str, name: &str) -> PortResult<Doc> {
        let doc = Doc {
            id: Uuid::new_v4().to_string(),
            folder_id: folder_id.to_string(),
            owner_id,
            name: name.to_string(),
            content: String::new(),
            created_at: Utc::now(),
        };
        let mut docs = self.docs.write().map_err(|_| lock_poisoned())?;
        docs.push(doc.clone());
        Ok(doc)
    }
}
