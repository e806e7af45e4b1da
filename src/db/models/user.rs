//! User models and auth form payloads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const PLAYER: &str = "player";

    pub const ALL: [&str; 2] = [ADMIN, PLAYER];
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }

    /// Landing page after login
    pub fn dashboard_path(&self) -> &'static str {
        if self.is_admin() {
            "/admin-dashboard"
        } else {
            "/player-dashboard"
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

// Missing form fields deserialize as empty strings so that a bad submission
// takes the same silent redirect as bad credentials.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}
