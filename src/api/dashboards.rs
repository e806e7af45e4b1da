//! Dashboard page views.
//!
//! The admin/player split is presentational: any logged-in user can load
//! either page.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::{SessionOverview, Sport, User, UserResponse};
use crate::{AppState, DbPool};

use super::error::ApiError;
use super::views::{AdminDashboardView, DashboardView, PlayerDashboardView};

/// Sessions with sport name, for player-facing lists and reports
pub(crate) const SESSIONS_WITH_SPORT: &str = r#"
    SELECT sessions.id, sessions.sport_id, sessions.creator_id, sessions.team1,
           sessions.team2, sessions.date, sessions.venue, sports.name AS sport_name
    FROM sessions
    JOIN sports ON sessions.sport_id = sports.id
    ORDER BY sessions.date, sessions.id
"#;

/// Sessions with sport and creator names, for the admin dashboard
const SESSIONS_WITH_SPORT_AND_CREATOR: &str = r#"
    SELECT sessions.id, sessions.sport_id, sessions.creator_id, sessions.team1,
           sessions.team2, sessions.date, sessions.venue, sports.name AS sport_name,
           users.name AS creator_name
    FROM sessions
    JOIN sports ON sessions.sport_id = sports.id
    JOIN users ON sessions.creator_id = users.id
    ORDER BY sessions.date, sessions.id
"#;

async fn all_sports(db: &DbPool) -> Result<Vec<Sport>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM sports ORDER BY name, id")
        .fetch_all(db)
        .await
}

/// GET /dashboard
pub async fn dashboard(user: Option<User>) -> Json<DashboardView> {
    Json(DashboardView {
        user: user.map(UserResponse::from),
    })
}

/// GET /admin-dashboard
pub async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
    user: User,
) -> Result<Json<AdminDashboardView>, ApiError> {
    let sports = all_sports(&state.db).await?;
    let sessions: Vec<SessionOverview> = sqlx::query_as(SESSIONS_WITH_SPORT_AND_CREATOR)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(AdminDashboardView {
        user: UserResponse::from(user),
        sports,
        sessions,
    }))
}

/// GET /player-dashboard
pub async fn player_dashboard(
    State(state): State<Arc<AppState>>,
    user: User,
) -> Result<Json<PlayerDashboardView>, ApiError> {
    let sessions: Vec<SessionOverview> = sqlx::query_as(SESSIONS_WITH_SPORT)
        .fetch_all(&state.db)
        .await?;
    let sports = all_sports(&state.db).await?;

    Ok(Json(PlayerDashboardView {
        user: UserResponse::from(user),
        sessions,
        sports,
    }))
}
