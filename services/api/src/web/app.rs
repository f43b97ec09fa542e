//! services/api/src/web/app.rs
//!
//! The folder browser page. One catch-all route covers three page states:
//! no folder selected, folder selected, folder and document selected.
//! A request without a session still gets a 200 carrying the blocking
//! "session expired" dialog; no folder data is read for it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use known_core::{resolve_app_props, AppProps, AppView, RouteSelection, UserSession};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::web::state::AppState;

/// Everything the client needs to render the folder browser.
#[derive(Debug, Serialize)]
pub struct AppPage {
    pub view: AppView,
    pub props: AppProps,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<RouteSelection>,
}

/// Splits the catch-all tail into non-empty segments.
fn split_segments(tail: &str) -> Vec<String> {
    tail.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

async fn render_app(
    state: &AppState,
    session: Option<UserSession>,
    segments: Vec<String>,
) -> Result<Json<AppPage>, (StatusCode, String)> {
    let props = resolve_app_props(state.db.as_ref(), session.as_ref(), &segments)
        .await
        .map_err(|e| {
            error!("Failed to resolve app page: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load folders".to_string())
        })?;

    let authenticated = session.is_some();
    let selection = authenticated.then(|| RouteSelection::from_props(&segments, &props));

    Ok(Json(AppPage {
        view: AppView::select(authenticated, &props),
        props,
        selection,
    }))
}

/// GET /app - Folder list, nothing selected
pub async fn app_root_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Option<UserSession>>,
) -> Result<Json<AppPage>, (StatusCode, String)> {
    render_app(&state, session, Vec::new()).await
}

/// GET /app/{*segments} - `[folder_id, _, doc_id]`
pub async fn app_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Option<UserSession>>,
    Path(tail): Path<String>,
) -> Result<Json<AppPage>, (StatusCode, String)> {
    render_app(&state, session, split_segments(&tail)).await
}
