//! Participation reports (admin).

use axum::{extract::State, response::Redirect, Json};
use std::sync::Arc;

use crate::db::{SessionOverview, SportPopularity, User};
use crate::{AppState, DbPool};

use super::dashboards::SESSIONS_WITH_SPORT;
use super::views::{ReportsView, ADMIN_DASHBOARD};

async fn load_report(db: &DbPool) -> Result<ReportsView, sqlx::Error> {
    let sessions: Vec<SessionOverview> = sqlx::query_as(SESSIONS_WITH_SPORT)
        .fetch_all(db)
        .await?;

    // Grouped by name, so two sports sharing a name count together
    let popularity: Vec<SportPopularity> = sqlx::query_as(
        r#"
        SELECT sports.name AS name, COUNT(sessions.id) AS count
        FROM sessions
        JOIN sports ON sessions.sport_id = sports.id
        GROUP BY sports.name
        ORDER BY count DESC, sports.name
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(ReportsView {
        sessions,
        popularity,
    })
}

/// GET /reports
pub async fn reports(
    State(state): State<Arc<AppState>>,
    _user: User,
) -> Result<Json<ReportsView>, Redirect> {
    load_report(&state.db).await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "Error loading reports");
        Redirect::to(ADMIN_DASHBOARD)
    })
}
