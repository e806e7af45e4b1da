//! Sports session management (admin) and joining (players).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use std::sync::Arc;

use crate::db::{
    CreateSessionForm, EditSessionForm, JoinSessionForm, JoinSessionResponse, SessionWithPlayers,
    SportSession, User,
};
use crate::AppState;

use super::error::{is_foreign_key_violation, ApiError, ValidationErrorBuilder};
use super::validation::{parse_id, validate_date, validate_id, validate_text};
use super::views::{ActionResponse, ADMIN_DASHBOARD};

/// Validated team names, date and venue of a session form
struct SessionFields {
    team1: String,
    team2: String,
    date: String,
    venue: String,
}

/// Validate an id field plus the shared session fields, reporting every
/// problem at once
fn validate_session_form(
    id_field: &str,
    id: &Option<String>,
    team1: &Option<String>,
    team2: &Option<String>,
    date: &Option<String>,
    venue: &Option<String>,
) -> Result<(i64, SessionFields), ApiError> {
    let results = (
        validate_id(id, id_field),
        validate_text(team1, "team1"),
        validate_text(team2, "team2"),
        validate_date(date),
        validate_text(venue, "venue"),
    );

    match results {
        (Ok(id), Ok(team1), Ok(team2), Ok(date), Ok(venue)) => Ok((
            id,
            SessionFields {
                team1,
                team2,
                date,
                venue,
            },
        )),
        (id, team1, team2, date, venue) => {
            let mut errors = ValidationErrorBuilder::new();
            if let Err(e) = id {
                errors.add(id_field, e);
            }
            if let Err(e) = team1 {
                errors.add("team1", e);
            }
            if let Err(e) = team2 {
                errors.add("team2", e);
            }
            if let Err(e) = date {
                errors.add("date", e);
            }
            if let Err(e) = venue {
                errors.add("venue", e);
            }
            Err(errors
                .build()
                .unwrap_or_else(|| ApiError::bad_request("All fields are required")))
        }
    }
}

/// Schedule a session, created by the logged-in user
///
/// POST /create-session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    user: User,
    Form(form): Form<CreateSessionForm>,
) -> Result<(StatusCode, Json<ActionResponse>), ApiError> {
    let (sport_id, fields) = validate_session_form(
        "sport_id",
        &form.sport_id,
        &form.team1,
        &form.team2,
        &form.date,
        &form.venue,
    )?;

    // An unknown sport_id fails the foreign key and comes back as a 400
    let result = sqlx::query(
        r#"
        INSERT INTO sessions (sport_id, creator_id, team1, team2, date, venue)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(sport_id)
    .bind(user.id)
    .bind(&fields.team1)
    .bind(&fields.team2)
    .bind(&fields.date)
    .bind(&fields.venue)
    .execute(&state.db)
    .await?;
    let id = result.last_insert_rowid();

    tracing::info!(session_id = id, sport_id, user_id = user.id, "Session created");

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok(ADMIN_DASHBOARD).with_id(id)),
    ))
}

/// Change the teams, date and venue of a session
///
/// POST /edit-session
pub async fn edit_session(
    State(state): State<Arc<AppState>>,
    user: User,
    Form(form): Form<EditSessionForm>,
) -> Result<Json<ActionResponse>, ApiError> {
    let (session_id, fields) = validate_session_form(
        "session_id",
        &form.session_id,
        &form.team1,
        &form.team2,
        &form.date,
        &form.venue,
    )?;

    let result = sqlx::query(
        "UPDATE sessions SET team1 = ?, team2 = ?, date = ?, venue = ? WHERE id = ?",
    )
    .bind(&fields.team1)
    .bind(&fields.team2)
    .bind(&fields.date)
    .bind(&fields.venue)
    .bind(session_id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Session not found"));
    }

    tracing::info!(session_id, user_id = user.id, "Session updated");

    Ok(Json(ActionResponse::ok(ADMIN_DASHBOARD).with_id(session_id)))
}

/// Delete a session along with its player list
///
/// POST /delete-session/:session_id
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(session_id): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    let session_id = parse_id(&session_id, "session_id")
        .map_err(|e| ApiError::validation_field("session_id", e))?;

    let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(session_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Session not found"));
    }

    tracing::info!(session_id, user_id = user.id, "Session deleted");

    Ok(Json(ActionResponse::ok(ADMIN_DASHBOARD).with_id(session_id)))
}

/// Add the logged-in user to a session's players and return the session with
/// everyone who has joined. Joining twice is a no-op.
///
/// POST /join-session
pub async fn join_session(
    State(state): State<Arc<AppState>>,
    user: User,
    Form(form): Form<JoinSessionForm>,
) -> Result<Json<JoinSessionResponse>, ApiError> {
    let session_id = validate_id(&form.session_id, "session_id")
        .map_err(|e| ApiError::validation_field("session_id", e))?;

    tracing::debug!(session_id, player_id = user.id, "Join request");

    let mut tx = state.db.begin().await?;

    // Write first so the transaction holds the write lock before it reads.
    // A read-then-write transaction cannot upgrade under concurrent joins.
    sqlx::query(
        r#"
        INSERT INTO session_players (session_id, player_id) VALUES (?, ?)
        ON CONFLICT (session_id, player_id) DO NOTHING
        "#,
    )
    .bind(session_id)
    .bind(user.id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            ApiError::not_found("Session not found")
        } else {
            ApiError::from(e)
        }
    })?;

    let session: SportSession = sqlx::query_as("SELECT * FROM sessions WHERE id = ?")
        .bind(session_id)
        .fetch_one(&mut *tx)
        .await?;

    let players: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT users.name
        FROM session_players
        JOIN users ON session_players.player_id = users.id
        WHERE session_players.session_id = ?
        ORDER BY session_players.id
        "#,
    )
    .bind(session_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(session_id, player_id = user.id, players = players.len(), "Player joined session");

    Ok(Json(JoinSessionResponse {
        session: SessionWithPlayers { session, players },
    }))
}
