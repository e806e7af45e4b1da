//! Sport management (admin).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use std::sync::Arc;

use crate::db::{CreateSportForm, User};
use crate::AppState;

use super::error::{is_foreign_key_violation, ApiError};
use super::validation::{parse_id, validate_text};
use super::views::{ActionResponse, ADMIN_DASHBOARD};

/// Create a sport. Names are not required to be unique.
///
/// POST /create-sport
pub async fn create_sport(
    State(state): State<Arc<AppState>>,
    user: User,
    Form(form): Form<CreateSportForm>,
) -> Result<(StatusCode, Json<ActionResponse>), ApiError> {
    let name = validate_text(&form.name, "name").map_err(|e| ApiError::validation_field("name", e))?;

    let result = sqlx::query("INSERT INTO sports (name) VALUES (?)")
        .bind(&name)
        .execute(&state.db)
        .await?;
    let id = result.last_insert_rowid();

    tracing::info!(sport_id = id, name = %name, user_id = user.id, "Sport created");

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok(ADMIN_DASHBOARD).with_id(id)),
    ))
}

/// Delete a sport. Refused while any session still refers to it.
///
/// POST /delete-sport/:id
pub async fn delete_sport(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    let id = parse_id(&id, "id").map_err(|e| ApiError::validation_field("id", e))?;

    let result = sqlx::query("DELETE FROM sports WHERE id = ?")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                tracing::warn!(sport_id = id, "Refusing to delete sport with scheduled sessions");
                ApiError::conflict("Sport still has scheduled sessions")
            } else {
                ApiError::from(e)
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Sport not found"));
    }

    tracing::info!(sport_id = id, user_id = user.id, "Sport deleted");

    Ok(Json(ActionResponse::ok(ADMIN_DASHBOARD).with_id(id)))
}
