//! services/api/src/web/middleware.rs
//!
//! Session middleware for the browser-facing routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use known_core::domain::UserSession;
use known_core::ports::{PortError, PortResult};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::web::state::AppState;

const SESSION_COOKIE: &str = "session";

/// Extracts the auth session id from the `Cookie` header, if any.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?
        .split(';')
        .find_map(|c| {
            c.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|id| !id.is_empty())
}

/// Builds the `Set-Cookie` value for a session; `max_age` of 0 clears it.
pub fn session_cookie(session_id: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, session_id, max_age_secs
    )
}

/// Resolves a session id to the identity of its user.
///
/// Unknown, expired or orphaned sessions resolve to `Ok(None)`. Any other
/// database failure is returned so callers can answer with a 500.
pub async fn lookup_user_session(state: &AppState, session_id: &str) -> PortResult<Option<UserSession>> {
    let user_id = match state.db.validate_auth_session(session_id).await {
        Ok(user_id) => user_id,
        Err(PortError::Unauthorized) => {
            debug!("Rejected auth session");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    match state.db.get_user_by_id(user_id).await {
        Ok(user) => Ok(Some(UserSession::from(user))),
        Err(PortError::NotFound(_)) => {
            warn!("Auth session points at missing user {}", user_id);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Middleware that validates the auth session cookie and extracts the user.
///
/// If valid, inserts the `UserSession` into request extensions for handlers to use.
/// If invalid or missing, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_session_id = session_id_from_headers(req.headers())
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    let session = lookup_user_session(&state, &auth_session_id)
        .await
        .map_err(|e| {
            error!("Failed to look up auth session: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// Middleware that attaches `Option<UserSession>`; a missing or stale session
/// is not a rejection.
///
/// Pages use it to render their own unauthenticated state. Database failures
/// still surface as 500.
pub async fn load_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let session = match session_id_from_headers(req.headers()).map(str::to_string) {
        Some(id) => lookup_user_session(&state, &id).await.map_err(|e| {
            error!("Failed to look up auth session: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?,
        None => None,
    };

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let h = headers("theme=dark; session=abc123; lang=en");
        assert_eq!(session_id_from_headers(&h), Some("abc123"));
    }

    #[test]
    fn ignores_similarly_named_cookies() {
        let h = headers("session_hint=1; other=2");
        assert_eq!(session_id_from_headers(&h), None);
    }

    #[test]
    fn empty_session_value_is_absent() {
        assert_eq!(session_id_from_headers(&headers("session=")), None);
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn cleared_cookie_has_zero_max_age() {
        assert!(session_cookie("", 0).ends_with("Max-Age=0"));
    }
}
