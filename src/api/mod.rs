pub mod auth;
mod dashboards;
pub mod error;
mod reports;
pub mod session_store;
mod sessions;
mod sports;
mod validation;
pub mod views;

#[cfg(test)]
mod testing;

use axum::{
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Public pages and the login/registration flow
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/login", get(auth::login_page))
        .route("/login", post(auth::login))
        .route("/register", get(auth::register_page))
        .route("/register", post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(dashboards::dashboard));

    // Everything else requires a logged-in user
    let protected_routes = Router::new()
        // Pages
        .route("/admin-dashboard", get(dashboards::admin_dashboard))
        .route("/player-dashboard", get(dashboards::player_dashboard))
        .route("/reports", get(reports::reports))
        // Sports
        .route("/create-sport", post(sports::create_sport))
        .route("/delete-sport/:id", post(sports::delete_sport))
        // Sessions
        .route("/create-session", post(sessions::create_session))
        .route("/edit-session", post(sessions::edit_session))
        .route("/delete-session/:session_id", post(sessions::delete_session))
        .route("/join-session", post(sessions::join_session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Redirect {
    Redirect::to("/dashboard")
}
