//! crates/known_core/src/view.rs
//!
//! Picks which pane of the folder browser to render from resolved props.

use serde::Serialize;

use crate::domain::{Doc, Folder};
use crate::route::AppProps;

/// The blocking dialog shown when a request carries no session.
///
/// It has a single confirm action and no way to dismiss it otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExpiredDialog {
    pub title: &'static str,
    pub body: &'static str,
    pub confirm_label: &'static str,
    pub confirm_href: &'static str,
    pub has_cancel: bool,
    pub has_close: bool,
    pub close_on_overlay_click: bool,
    pub close_on_escape: bool,
}

impl Default for SessionExpiredDialog {
    fn default() -> Self {
        Self {
            title: "Session expired",
            body: "Sign in to continue",
            confirm_label: "Ok",
            confirm_href: "/signin",
            has_cancel: false,
            has_close: false,
            close_on_overlay_click: false,
            close_on_escape: false,
        }
    }
}

/// The content pane to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppView {
    SessionExpired { dialog: SessionExpiredDialog },
    Doc { folder: Folder, doc: Doc },
    Folder { folder: Folder, docs: Vec<Doc> },
    Empty,
}

impl AppView {
    /// Document view wins over folder view; an unauthenticated request
    /// always gets the session dialog, whatever the props hold.
    pub fn select(authenticated: bool, props: &AppProps) -> Self {
        if !authenticated {
            return AppView::SessionExpired {
                dialog: SessionExpiredDialog::default(),
            };
        }

        match (&props.active_folder, &props.active_doc) {
            (Some(folder), Some(doc)) => AppView::Doc {
                folder: folder.clone(),
                doc: doc.clone(),
            },
            (Some(folder), None) => AppView::Folder {
                folder: folder.clone(),
                docs: props.active_docs.clone().unwrap_or_default(),
            },
            _ => AppView::Empty,
        }
    }
}
