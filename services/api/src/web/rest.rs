//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the folder and document endpoints and the
//! master definition for the OpenAPI specification.

use crate::web::auth::{AuthResponse, LoginRequest, SignupRequest};
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{DateTime, Utc};
use known_core::domain::{Doc, Folder, UserSession};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_folder_handler,
        create_doc_handler,
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
    ),
    components(
        schemas(
            CreateFolderRequest,
            CreateDocRequest,
            FolderData,
            DocData,
            FolderCreatedResponse,
            DocCreatedResponse,
            SignupRequest,
            LoginRequest,
            AuthResponse,
        )
    ),
    tags(
        (name = "Known API", description = "Folders, documents and sessions for the Known workspace.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateFolderRequest {
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocRequest {
    pub folder_id: String,
    pub name: String,
}

/// A folder as returned by the API.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderData {
    pub id: String,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Folder> for FolderData {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
            owner_id: folder.owner_id,
            created_at: folder.created_at,
        }
    }
}

/// A document as returned by the API.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocData {
    pub id: String,
    pub folder_id: String,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Doc> for DocData {
    fn from(doc: Doc) -> Self {
        Self {
            id: doc.id,
            folder_id: doc.folder_id,
            name: doc.name,
            content: doc.content,
            created_at: doc.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct FolderCreatedResponse {
    pub data: FolderData,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DocCreatedResponse {
    pub data: DocData,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Create a folder owned by the signed-in user.
///
/// No deduplication: two requests with the same name create two folders.
#[utoipa::path(
    post,
    path = "/api/folder/",
    request_body = CreateFolderRequest,
    responses(
        (status = 201, description = "Folder created", body = FolderCreatedResponse),
        (status = 400, description = "Blank folder name"),
        (status = 401, description = "No valid session"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_folder_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<UserSession>,
    Json(req): Json<CreateFolderRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Folder name is required".to_string()));
    }

    let folder = state.db.create_folder(session.id, name).await.map_err(|e| {
        error!("Failed to create folder: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create folder".to_string())
    })?;
    info!("User {} created folder {}", session.id, folder.id);

    Ok((
        StatusCode::CREATED,
        Json(FolderCreatedResponse {
            data: folder.into(),
        }),
    ))
}

/// Create an empty document in one of the signed-in user's folders.
#[utoipa::path(
    post,
    path = "/api/doc/",
    request_body = CreateDocRequest,
    responses(
        (status = 201, description = "Document created", body = DocCreatedResponse),
        (status = 400, description = "Blank document name"),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Folder not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_doc_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<UserSession>,
    Json(req): Json<CreateDocRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Document name is required".to_string()));
    }

    let folders = state.db.get_folders(session.id).await.map_err(|e| {
        error!("Failed to load folders: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create document".to_string())
    })?;
    if !folders.iter().any(|f| f.id == req.folder_id) {
        return Err((StatusCode::NOT_FOUND, "Folder not found".to_string()));
    }

    let doc = state
        .db
        .create_doc(session.id, &req.folder_id, name)
        .await
        .map_err(|e| {
            error!("Failed to create document: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create document".to_string())
        })?;

    Ok((StatusCode::CREATED, Json(DocCreatedResponse { data: doc.into() })))
}
