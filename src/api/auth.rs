use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::db::{LoginForm, RegisterForm, User};
use crate::AppState;

use super::validation::{validate_email, validate_role};

/// Cookie carrying the HTTP session token
pub const SESSION_COOKIE: &str = "matchday_session";

const LOGIN_PAGE: &str = "/login";
const REGISTER_PAGE: &str = "/register";

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Resolve the logged-in user from the session cookie
fn current_user(jar: &CookieJar, state: &AppState) -> Option<User> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| state.sessions.get(c.value()))
}

/// Auth gate: forwards requests that carry a live session, sends everything
/// else to the login page
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());

    match current_user(&jar, &state) {
        Some(_) => next.run(request).await,
        None => {
            tracing::debug!(path = %request.uri().path(), "No session, redirecting to login");
            Redirect::to(LOGIN_PAGE).into_response()
        }
    }
}

/// Extractor for the authenticated user behind the request's session cookie
#[async_trait]
impl FromRequestParts<Arc<AppState>> for User {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        current_user(&jar, state).ok_or_else(|| Redirect::to(LOGIN_PAGE))
    }
}

/// GET /login
pub async fn login_page() -> Html<&'static str> {
    Html(include_str!("../../pages/login.html"))
}

/// GET /register
pub async fn register_page() -> Html<&'static str> {
    Html(include_str!("../../pages/register.html"))
}

/// POST /login
///
/// Any failure lands back on the login page without saying why.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let user: Option<User> = match sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(&form.email)
        .fetch_optional(&state.db)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, "Error during login");
            return Redirect::to(LOGIN_PAGE).into_response();
        }
    };

    let user = match user {
        Some(user) if verify_password(&form.password, &user.password_hash) => user,
        _ => {
            tracing::info!(email = %form.email, "Failed login attempt");
            return Redirect::to(LOGIN_PAGE).into_response();
        }
    };

    // Drop whatever session this browser held before
    if let Some(old) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(old.value());
    }

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    let destination = user.dashboard_path();
    let token = state.sessions.create(user);
    let jar = jar.add(session_cookie(token, state.config.auth.secure_cookies));

    (jar, Redirect::to(destination)).into_response()
}

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Redirect {
    match create_user(&state, &form).await {
        Ok(user_id) => {
            tracing::info!(user_id, email = %form.email, role = %form.role, "User registered");
            Redirect::to(LOGIN_PAGE)
        }
        Err(e) => {
            tracing::error!(error = %e, email = %form.email, "Error during registration");
            Redirect::to(REGISTER_PAGE)
        }
    }
}

async fn create_user(state: &AppState, form: &RegisterForm) -> anyhow::Result<i64> {
    let name = form.name.trim();
    if name.is_empty() {
        anyhow::bail!("Name is required");
    }
    if form.password.is_empty() {
        anyhow::bail!("Password is required");
    }
    validate_email(&form.email).map_err(anyhow::Error::msg)?;
    validate_role(&form.role).map_err(anyhow::Error::msg)?;

    let password_hash = hash_password(&form.password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let result = sqlx::query(
        "INSERT INTO users (name, email, password_hash, role) VALUES (?, ?, ?, ?)",
    )
    .bind(name)
    .bind(&form.email)
    .bind(&password_hash)
    .bind(&form.role)
    .execute(&state.db)
    .await?;

    Ok(result.last_insert_rowid())
}

/// GET /logout
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value());
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(LOGIN_PAGE))
}
