//! Sports session (scheduled match) models and form payloads.
//!
//! Not to be confused with the HTTP session held by the auth layer.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SportSession {
    pub id: i64,
    pub sport_id: i64,
    pub creator_id: i64,
    pub team1: String,
    pub team2: String,
    pub date: String,
    pub venue: String,
    pub created_at: String,
}

/// Session joined with its sport name, and with the creator's name where the
/// query selects it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionOverview {
    pub id: i64,
    pub sport_id: i64,
    pub creator_id: i64,
    pub team1: String,
    pub team2: String,
    pub date: String,
    pub venue: String,
    pub sport_name: String,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
}

/// Session with the names of everyone who joined it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWithPlayers {
    #[serde(flatten)]
    pub session: SportSession,
    pub players: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JoinSessionResponse {
    pub session: SessionWithPlayers,
}

// Form fields stay optional here; handlers decide what is required.

#[derive(Debug, Deserialize)]
pub struct CreateSessionForm {
    pub sport_id: Option<String>,
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditSessionForm {
    pub session_id: Option<String>,
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JoinSessionForm {
    pub session_id: Option<String>,
}
