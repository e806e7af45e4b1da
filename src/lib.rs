pub mod api;
pub mod config;
pub mod db;

pub use db::DbPool;

use config::Config;
use std::sync::Arc;

use crate::api::session_store::SessionStore;

pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        let ttl = chrono::Duration::hours(config.auth.session_ttl_hours);
        Self {
            config,
            db,
            sessions: Arc::new(SessionStore::new(ttl)),
        }
    }
}
