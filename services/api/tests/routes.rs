//! Router-level tests against an in-memory database.

use std::fs;
use std::sync::Arc;

use api_lib::config::Config;
use api_lib::web::{build_router, spawn_blog_build, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use known_core::{MockDatabase, User};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

const COOKIE: &str = "session=s1";

fn config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused".to_string()),
        _ => None,
    })
    .unwrap()
}

struct Harness {
    db: Arc<MockDatabase>,
    state: Arc<AppState>,
    router: Router,
    user_id: Uuid,
}

fn harness() -> Harness {
    let user_id = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let db = Arc::new(
        MockDatabase::new()
            .with_user(
                User {
                    user_id,
                    email: "ada@example.com".to_string(),
                    name: Some("Ada".to_string()),
                    image: None,
                },
                "unused-hash",
            )
            .with_auth_session("s1", user_id, Utc::now() + Duration::days(1))
            .with_auth_session("expired", user_id, Utc::now() - Duration::days(1))
            .with_folder(user_id, "f1", "Projects")
            .with_folder(user_id, "f2", "Empty")
            .with_folder(stranger, "f9", "Not yours")
            .with_doc(user_id, "f1", "d1", "Plan"),
    );
    let state = Arc::new(AppState::new(db.clone(), Arc::new(config())));
    let router = build_router(state.clone()).unwrap();
    Harness {
        db,
        state,
        router,
        user_id,
    }
}

fn router_over(db: MockDatabase) -> Router {
    let state = Arc::new(AppState::new(Arc::new(db), Arc::new(config())));
    build_router(state).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// ── folder browser ───────────────────────────────────────────────────

#[tokio::test]
async fn app_without_session_shows_blocking_dialog() {
    let h = harness();
    let (status, body) = send(&h.router, get("/app/f1/doc/d1", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["kind"], "session_expired");
    assert_eq!(body["view"]["dialog"]["hasClose"], false);
    assert_eq!(body["view"]["dialog"]["closeOnEscape"], false);
    assert_eq!(body["props"], json!({}));
    assert!(body.get("selection").is_none());
    assert_eq!(h.db.reads(), 0);
}

#[tokio::test]
async fn app_with_expired_session_shows_blocking_dialog() {
    let h = harness();
    let (_, body) = send(&h.router, get("/app", Some("session=expired"))).await;
    assert_eq!(body["view"]["kind"], "session_expired");
    assert_eq!(h.db.reads(), 0);
}

#[tokio::test]
async fn app_root_lists_folders_with_empty_pane() {
    let h = harness();
    let (status, body) = send(&h.router, get("/app", Some(COOKIE))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["kind"], "empty");
    assert_eq!(body["props"]["newSession"]["id"], h.user_id.to_string());
    let folders: Vec<&str> = body["props"]["folders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(folders, vec!["f1", "f2"]);
    assert!(body["props"].get("activeFolder").is_none());
    assert_eq!(body["selection"], json!({ "folder": "unselected", "doc": "unselected" }));
}

#[tokio::test]
async fn app_folder_route_renders_folder_pane() {
    let h = harness();
    let (_, body) = send(&h.router, get("/app/f2", Some(COOKIE))).await;

    assert_eq!(body["view"]["kind"], "folder");
    assert_eq!(body["view"]["folder"]["id"], "f2");
    assert_eq!(body["props"]["activeDocs"], json!([]));
}

#[tokio::test]
async fn app_doc_route_renders_doc_pane() {
    let h = harness();
    let (_, body) = send(&h.router, get("/app/f1/doc/d1", Some(COOKIE))).await;

    assert_eq!(body["view"]["kind"], "doc");
    assert_eq!(body["view"]["doc"]["name"], "Plan");
    assert_eq!(body["props"]["activeDoc"]["folderId"], "f1");
}

#[tokio::test]
async fn app_unknown_ids_fall_through_to_empty_pane() {
    let h = harness();
    let (status, body) = send(&h.router, get("/app/f9/doc/d1", Some(COOKIE))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["kind"], "empty");
    assert_eq!(body["selection"]["folder"], "not_found");
}

#[tokio::test]
async fn app_for_user_without_folders_carries_empty_list() {
    let user_id = Uuid::new_v4();
    let db = MockDatabase::new()
        .with_user(
            User {
                user_id,
                email: "new@example.com".to_string(),
                name: None,
                image: None,
            },
            "unused-hash",
        )
        .with_auth_session("s1", user_id, Utc::now() + Duration::days(1));
    let router = router_over(db);

    let (status, body) = send(&router, get("/app", Some(COOKIE))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["props"]["folders"], json!([]));
}

#[tokio::test]
async fn session_store_outage_is_a_server_error() {
    let router = router_over(MockDatabase::new().with_sessions_down());

    let (status, body) = send(&router, get("/app", Some(COOKIE))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_ne!(body["view"]["kind"], "session_expired");

    let (status, _) = send(&router, post_json("/api/folder/", Some(COOKIE), json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ── folders and documents ────────────────────────────────────────────

#[tokio::test]
async fn create_folder_requires_session() {
    let h = harness();
    let (status, _) = send(&h.router, post_json("/api/folder/", None, json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_folder_returns_record_and_lists_it() {
    let h = harness();
    let (status, body) = send(
        &h.router,
        post_json("/api/folder/", Some(COOKIE), json!({ "name": "  Reading  " })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Reading");
    assert_eq!(body["data"]["ownerId"], h.user_id.to_string());

    let (_, page) = send(&h.router, get("/app", Some(COOKIE))).await;
    let names: Vec<&str> = page["props"]["folders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Projects", "Empty", "Reading"]);
}

#[tokio::test]
async fn create_folder_rejects_blank_name() {
    let h = harness();
    let (status, _) = send(
        &h.router,
        post_json("/api/folder/", Some(COOKIE), json!({ "name": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_doc_in_own_folder() {
    let h = harness();
    let (status, body) = send(
        &h.router,
        post_json("/api/doc/", Some(COOKIE), json!({ "folderId": "f2", "name": "Draft" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["folderId"], "f2");

    let (_, page) = send(&h.router, get("/app/f2", Some(COOKIE))).await;
    assert_eq!(page["props"]["activeDocs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_doc_in_foreign_folder_is_not_found() {
    let h = harness();
    let (status, _) = send(
        &h.router,
        post_json("/api/doc/", Some(COOKIE), json!({ "folderId": "f9", "name": "Sneaky" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── auth ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn signup_login_logout_round() {
    let h = harness();

    let signup = post_json(
        "/auth/signup",
        None,
        json!({ "email": "Grace@Example.com", "password": "hunter2", "name": "Grace" }),
    );
    let response = h.router.clone().oneshot(signup).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().get(header::SET_COOKIE).is_some());

    let login = post_json(
        "/auth/login",
        None,
        json!({ "email": "grace@example.com", "password": "hunter2" }),
    );
    let response = h.router.clone().oneshot(login).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let (_, page) = send(&h.router, get("/app", Some(&cookie))).await;
    assert_eq!(page["view"]["kind"], "empty");
    assert_eq!(page["props"]["newSession"]["email"], "grace@example.com");
    assert_eq!(page["props"]["newSession"]["name"], "Grace");

    let logout = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = h.router.clone().oneshot(logout).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, page) = send(&h.router, get("/app", Some(&cookie))).await;
    assert_eq!(page["view"]["kind"], "session_expired");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let h = harness();
    send(
        &h.router,
        post_json("/auth/signup", None, json!({ "email": "a@b.c", "password": "right" })),
    )
    .await;

    let (status, _) = send(
        &h.router,
        post_json("/auth/login", None, json!({ "email": "a@b.c", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_deletes_auth_session() {
    let h = harness();
    let request = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::COOKIE, COOKIE)
        .body(Body::empty())
        .unwrap();
    let response = h.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!h.db.has_auth_session("s1"));
}

// ── blog ─────────────────────────────────────────────────────────────

fn write_post(dir: &TempDir, file: &str, slug: &str) {
    let content = format!("---\nslug: {slug}\ntitle: Title {slug}\nsummary: Summary {slug}\n---\n\nHello **{slug}**.\n");
    fs::write(dir.path().join(file), content).unwrap();
}

#[tokio::test]
async fn blog_is_loading_until_built() {
    let h = harness();
    let (status, body) = send(&h.router, get("/blog/a", None)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["state"], "loading");

    let (status, _) = send(&h.router, get("/blog", None)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn blog_serves_only_built_slugs() {
    let h = harness();
    let posts = TempDir::new().unwrap();
    write_post(&posts, "a.md", "a");
    write_post(&posts, "b.md", "b");

    spawn_blog_build(h.state.clone(), posts.path().to_path_buf())
        .await
        .unwrap()
        .unwrap();

    let (status, body) = send(&h.router, get("/blog/a", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "ready");
    assert_eq!(body["documentTitle"], "Known Blog | Title a");
    assert_eq!(body["description"], "Summary a");
    assert_eq!(body["html"], "<p>Hello <strong>a</strong>.</p>\n");

    let (status, body) = send(&h.router, get("/blog/c", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["state"], "not_found");

    let (status, body) = send(&h.router, get("/blog", None)).await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["a", "b"]);
}

#[tokio::test]
async fn malformed_post_fails_build_and_keeps_blog_unpublished() {
    let h = harness();
    let posts = TempDir::new().unwrap();
    write_post(&posts, "a.md", "a");
    fs::write(posts.path().join("bad.md"), "---\ntitle: No slug\nsummary: S\n---\n").unwrap();

    let result = spawn_blog_build(h.state.clone(), posts.path().to_path_buf())
        .await
        .unwrap();
    assert!(result.is_err());

    let (status, _) = send(&h.router, get("/blog/a", None)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
}
