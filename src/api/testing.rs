// Test harness: the real router over an in-memory database

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::Config;
use crate::AppState;

pub async fn test_app() -> (Router, Arc<AppState>) {
    let db = crate::db::in_memory().await;
    let state = Arc::new(AppState::new(Config::default(), db));
    (super::create_router(state.clone()), state)
}

/// The router over a pooled SQLite file, for tests that need several
/// connections at once
pub async fn file_app(path: &Path) -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.database.url = format!("sqlite:{}?mode=rwc", path.display());
    let db = crate::db::init(&config.database).await.unwrap();
    let state = Arc::new(AppState::new(config, db));
    (super::create_router(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `name=value` part of the session Set-Cookie header, ready to send back
pub fn session_cookie_from(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("matchday_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

pub async fn register_user(app: &Router, name: &str, email: &str, password: &str, role: &str) {
    let body = format!(
        "name={}&email={}&password={}&role={}",
        name,
        email.replace('@', "%40"),
        password,
        role
    );
    let response = send(app, post_form("/register", &body, None)).await;
    assert_eq!(location(&response), "/login", "registration of {} failed", email);
}

/// Register a user, log in, and return the session cookie
pub async fn register_and_login(
    app: &Router,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> String {
    register_user(app, name, email, password, role).await;

    let body = format!("email={}&password={}", email.replace('@', "%40"), password);
    let response = send(app, post_form("/login", &body, None)).await;
    session_cookie_from(&response).expect("login did not set a session cookie")
}
