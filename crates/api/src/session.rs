//! Session and OTP storage.
//!
//! Login sessions and pending registration codes are short-lived and kept
//! behind [`SessionStore`], which is handed to handlers through `AppState`.
//! Session tokens are never stored in the clear: entries are keyed by the
//! SHA-256 of the token.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use shared::crypto::{generate_session_token, sha256_hex};

/// Opaque bearer token returned to the client at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Data attached to a login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: DateTime<Utc>,
}

/// Storage for pending OTP codes and login sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Remember `code` for `phone`, replacing any earlier code.
    async fn put_otp(&self, phone: &str, code: &str, ttl: Duration);

    /// Remove and return the unexpired code issued to `phone`.
    async fn take_otp(&self, phone: &str) -> Option<String>;

    /// Open a session for `user_id` and return its token.
    async fn create_session(&self, user_id: i32, ttl: Duration) -> SessionToken;

    /// Look up an unexpired session by token.
    async fn get_session(&self, token: &str) -> Option<SessionData>;

    /// Drop a session. Returns whether one existed.
    async fn remove_session(&self, token: &str) -> bool;

    /// Drop every expired OTP code and session. Returns how many were removed.
    async fn purge_expired(&self) -> usize;
}

/// Process-local [`SessionStore`].
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    otps: RwLock<HashMap<String, OtpEntry>>,
    sessions: RwLock<HashMap<String, SessionData>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn otp_count(&self) -> usize {
        self.otps.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put_otp(&self, phone: &str, code: &str, ttl: Duration) {
        let entry = OtpEntry {
            code: code.to_string(),
            expires_at: Utc::now() + ttl,
        };
        self.otps.write().await.insert(phone.to_string(), entry);
    }

    async fn take_otp(&self, phone: &str) -> Option<String> {
        let entry = self.otps.write().await.remove(phone)?;
        (entry.expires_at > Utc::now()).then_some(entry.code)
    }

    async fn create_session(&self, user_id: i32, ttl: Duration) -> SessionToken {
        let token = generate_session_token();
        let now = Utc::now();
        let data = SessionData {
            user_id,
            created_at: now,
            expires_at: now + ttl,
        };
        self.sessions.write().await.insert(sha256_hex(&token), data);
        SessionToken(token)
    }

    async fn get_session(&self, token: &str) -> Option<SessionData> {
        let key = sha256_hex(token);
        let session = self.sessions.read().await.get(&key).cloned()?;
        if session.is_expired(Utc::now()) {
            self.sessions.write().await.remove(&key);
            return None;
        }
        Some(session)
    }

    async fn remove_session(&self, token: &str) -> bool {
        self.sessions
            .write()
            .await
            .remove(&sha256_hex(token))
            .is_some()
    }

    async fn purge_expired(&self) -> usize {
        let now = Utc::now();

        let mut otps = self.otps.write().await;
        let otp_before = otps.len();
        otps.retain(|_, entry| entry.expires_at > now);
        let otp_removed = otp_before - otps.len();
        drop(otps);

        let mut sessions = self.sessions.write().await;
        let session_before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        let session_removed = session_before - sessions.len();

        otp_removed + session_removed
    }
}
