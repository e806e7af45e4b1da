//! Sport models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sport {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSportForm {
    pub name: Option<String>,
}

/// Row of the popularity report: number of sessions scheduled per sport
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SportPopularity {
    pub name: String,
    pub count: i64,
}
