// Response bodies: page view models and the mutation result envelope

use serde::{Deserialize, Serialize};

use crate::db::{SessionOverview, Sport, SportPopularity, UserResponse};

pub const ADMIN_DASHBOARD: &str = "/admin-dashboard";

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: Option<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboardView {
    pub user: UserResponse,
    pub sports: Vec<Sport>,
    pub sessions: Vec<SessionOverview>,
}

#[derive(Debug, Serialize)]
pub struct PlayerDashboardView {
    pub user: UserResponse,
    pub sessions: Vec<SessionOverview>,
    pub sports: Vec<Sport>,
}

#[derive(Debug, Serialize)]
pub struct ReportsView {
    pub sessions: Vec<SessionOverview>,
    pub popularity: Vec<SportPopularity>,
}

/// Body returned by every successful data mutation. `redirect` names the page
/// the client should show next.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub status: String,
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl ActionResponse {
    pub fn ok(redirect: &str) -> Self {
        Self {
            status: "ok".to_string(),
            redirect: redirect.to_string(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
