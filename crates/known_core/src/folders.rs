//! crates/known_core/src/folders.rs
//!
//! Client-side folder list with the "new folder" state machine.
//!
//! A submission moves `Idle -> Pending -> Succeeded | Failed`. On success the
//! returned record is appended to the local list; the full list is never
//! refetched. Duplicate submissions are not deduplicated.

use tracing::{error, info};

use crate::domain::FolderSummary;
use crate::ports::{FolderApi, PortResult};

/// State of the most recent folder submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewFolderState {
    Idle,
    Pending { name: String },
    Succeeded(FolderSummary),
    Failed(String),
}

/// The folder list a client holds between page loads.
#[derive(Debug, Clone)]
pub struct FolderList {
    folders: Vec<FolderSummary>,
    state: NewFolderState,
}

impl FolderList {
    pub fn new(folders: Vec<FolderSummary>) -> Self {
        Self {
            folders,
            state: NewFolderState::Idle,
        }
    }

    pub fn folders(&self) -> &[FolderSummary] {
        &self.folders
    }

    pub fn state(&self) -> &NewFolderState {
        &self.state
    }

    /// Enters `Pending` for `name`.
    pub fn begin(&mut self, name: &str) {
        self.state = NewFolderState::Pending {
            name: name.to_string(),
        };
    }

    /// Applies the outcome of a pending submission.
    pub fn complete(&mut self, outcome: &PortResult<FolderSummary>) {
        self.state = match outcome {
            Ok(record) => {
                self.folders.push(record.clone());
                NewFolderState::Succeeded(record.clone())
            }
            Err(e) => NewFolderState::Failed(e.to_string()),
        };
    }

    /// Creates a folder through `api` and appends the result.
    ///
    /// The error is recorded in the state and also returned, so callers can
    /// surface it to the user.
    pub async fn submit(&mut self, api: &dyn FolderApi, name: &str) -> PortResult<FolderSummary> {
        self.begin(name);
        let outcome = api.create_folder(name).await;
        match &outcome {
            Ok(record) => info!("Created folder {} ({})", record.name, record.id),
            Err(e) => error!("Failed to create folder {}: {:?}", name, e),
        }
        self.complete(&outcome);
        outcome
    }
}
