//! crates/known_core/src/route.rs
//!
//! Resolves the catch-all `/app/...` path into the props of the folder browser.
//!
//! The path carries up to three segments: `[folder_id, _, doc_id]`. Slot 1 is
//! positional padding and never consulted. Three page states come out of it:
//! 1. no folder selected,
//! 2. folder selected,
//! 3. folder selected and document selected.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Doc, Folder, UserSession};
use crate::ports::{DatabaseService, PortResult};

const FOLDER_SLOT: usize = 0;
const DOC_SLOT: usize = 2;

/// Page props handed to the rendering layer.
///
/// Invariants: `folders` is set (possibly empty) exactly when a session is,
/// `active_doc` is only set when `active_folder` is set, and `active_docs`
/// is set (possibly empty) exactly when `active_folder` is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_session: Option<UserSession>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folders: Option<Vec<Folder>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_folder: Option<Folder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_docs: Option<Vec<Doc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_doc: Option<Doc>,
}

impl AppProps {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Distinguishes "nothing asked for" from "asked for an id that does not exist".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Unselected,
    Selected,
    NotFound,
}

/// Selection status of the folder and document slots of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteSelection {
    pub folder: Selection,
    pub doc: Selection,
}

impl RouteSelection {
    /// Derives the selection status from the requested segments and the
    /// props the resolver produced for them.
    pub fn from_props(segments: &[String], props: &AppProps) -> Self {
        let folder = match (segments.get(FOLDER_SLOT), &props.active_folder) {
            (None, _) => Selection::Unselected,
            (Some(_), Some(_)) => Selection::Selected,
            (Some(_), None) => Selection::NotFound,
        };
        let doc = match (segments.get(DOC_SLOT), &props.active_doc) {
            (None, _) => Selection::Unselected,
            (Some(_), Some(_)) => Selection::Selected,
            (Some(_), None) => Selection::NotFound,
        };
        Self { folder, doc }
    }
}

/// Builds the folder-browser props for one request.
///
/// Without a session nothing is read and empty props come back; protected
/// data is never partially rendered. Unknown folder or document ids fall
/// through to an empty selection rather than an error.
pub async fn resolve_app_props(
    db: &dyn DatabaseService,
    session: Option<&UserSession>,
    segments: &[String],
) -> PortResult<AppProps> {
    let Some(session) = session else {
        debug!("No session on request, returning empty props");
        return Ok(AppProps::default());
    };

    let folders = db.get_folders(session.id).await?;
    let mut props = AppProps {
        new_session: Some(session.clone()),
        ..AppProps::default()
    };

    if let Some(folder_id) = segments.get(FOLDER_SLOT) {
        if let Some(folder) = folders.iter().find(|f| &f.id == folder_id) {
            let docs = db.get_docs_by_folder(&folder.id).await?;

            if segments.len() > DOC_SLOT {
                let doc_id = &segments[DOC_SLOT];
                props.active_doc = docs.iter().find(|d| &d.id == doc_id).cloned();
            }

            props.active_folder = Some(folder.clone());
            props.active_docs = Some(docs);
        } else {
            debug!("Folder {} not found for user {}", folder_id, session.id);
        }
    }

    props.folders = Some(folders);
    Ok(props)
}
