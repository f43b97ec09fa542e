//! services/api/src/web/router.rs
//!
//! Assembles the HTTP router from the handler modules.

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ConfigError;
use crate::error::ApiError;
use crate::web::{
    app::{app_handler, app_root_handler},
    auth::{login_handler, logout_handler, signup_handler},
    blog::{blog_index_handler, blog_post_handler},
    middleware::{load_session, require_auth},
    rest::{create_doc_handler, create_folder_handler},
    state::AppState,
};

/// Builds the application router over `app_state`.
pub fn build_router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let origin = app_state
        .config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string()))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/blog", get(blog_index_handler))
        .route("/blog/{slug}", get(blog_post_handler));

    // Page routes (session optional, rendered as a blocking dialog when absent)
    let page_routes = Router::new()
        .route("/app", get(app_root_handler))
        .route("/app/{*segments}", get(app_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            load_session,
        ));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/api/folder/", post(create_folder_handler))
        .route("/api/doc/", post(create_doc_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    Ok(Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
