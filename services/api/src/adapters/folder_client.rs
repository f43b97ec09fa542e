//! services/api/src/adapters/folder_client.rs
//!
//! HTTP adapter for the `FolderApi` port: posts new folders to
//! `{PUBLIC_API_HOST}/api/folder/` and reads back the stored record.

use async_trait::async_trait;
use known_core::domain::FolderSummary;
use known_core::ports::{FolderApi, PortError, PortResult};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

#[derive(Serialize)]
struct CreateFolderBody<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct FolderEnvelope {
    data: FolderSummary,
}

/// An adapter that implements the `FolderApi` port over HTTP.
#[derive(Clone)]
pub struct HttpFolderClient {
    client: Client,
    endpoint: String,
    session_id: Option<String>,
}

impl HttpFolderClient {
    /// Creates a client targeting `api_host` (scheme and authority, no path).
    pub fn new(client: Client, api_host: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/folder/", api_host.trim_end_matches('/')),
            session_id: None,
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(client, &config.public_api_host)
    }

    /// Sends `session_id` as the auth cookie on every request.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FolderApi for HttpFolderClient {
    async fn create_folder(&self, name: &str) -> PortResult<FolderSummary> {
        debug!("POST {} name={}", self.endpoint, name);

        let mut request = self.client.post(&self.endpoint).json(&CreateFolderBody { name });
        if let Some(session_id) = &self.session_id {
            request = request.header(header::COOKIE, format!("session={}", session_id));
        }

        let response = request
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(PortError::Unauthorized);
        }
        if !status.is_success() {
            return Err(PortError::Unexpected(format!(
                "Folder creation failed with status {}",
                status
            )));
        }

        let envelope: FolderEnvelope = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(envelope.data)
    }
}
