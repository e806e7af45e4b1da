//! Process-held HTTP sessions.
//!
//! A login hands the browser a random token in a cookie. The store keeps the
//! authenticated user row keyed by the SHA-256 of that token, so the raw token
//! is never held server side. Records live until logout or until the
//! configured TTL runs out. Expired records are evicted when next looked up,
//! and a background task sweeps out the ones nobody asks for again.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::db::User;

/// Generate a random token
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Hash a token for storage
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
struct AuthSession {
    user: User,
    expires_at: DateTime<Utc>,
}

impl AuthSession {
    fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, AuthSession>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Start a session for `user` and return the token to hand to the browser
    pub fn create(&self, user: User) -> String {
        let token = generate_token();
        let session = AuthSession {
            user,
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.insert(hash_token(&token), session);
        token
    }

    /// Look up the user behind a token
    pub fn get(&self, token: &str) -> Option<User> {
        let key = hash_token(token);

        let session = self.sessions.get(&key).map(|entry| entry.value().clone())?;
        if session.is_expired() {
            self.sessions.remove(&key);
            return None;
        }

        Some(session.user)
    }

    /// Forget a session. Unknown tokens are ignored.
    pub fn destroy(&self, token: &str) {
        self.sessions.remove(&hash_token(token));
    }

    /// Drop every expired record
    pub fn cleanup_expired(&self) {
        let now = Utc::now();
        self.sessions.retain(|_, session| session.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Spawn a background task that periodically sweeps expired sessions
pub fn spawn_cleanup_task(store: Arc<SessionStore>, cleanup_interval_secs: u64) {
    tokio::spawn(async move {
        let interval = std::time::Duration::from_secs(cleanup_interval_secs);
        loop {
            tokio::time::sleep(interval).await;
            store.cleanup_expired();
            tracing::debug!("Session cleanup complete, {} sessions remaining", store.len());
        }
    });
}
