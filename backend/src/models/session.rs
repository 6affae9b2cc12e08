//! Models for server-side session records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of one connected client's session.
pub struct Session {
    /// Opaque identifier stored in the session cookie.
    pub id: String,
    /// User the session belongs to.
    pub user_id: String,
    /// Per-session CSRF token; generated lazily on first use and never
    /// rotated for the lifetime of the session.
    pub csrf_token: Option<String>,
    /// Timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the session last authenticated a request.
    pub last_seen_at: Option<DateTime<Utc>>,
    /// Timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns `true` while the session has not passed its expiry.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_in(minutes: i64) -> Session {
        let now = Utc::now();
        Session {
            id: "sess".into(),
            user_id: "user".into(),
            csrf_token: None,
            created_at: now,
            last_seen_at: None,
            expires_at: now + Duration::minutes(minutes),
        }
    }

    #[test]
    fn session_is_active_until_expiry() {
        assert!(session_expiring_in(5).is_active(Utc::now()));
        assert!(!session_expiring_in(-5).is_active(Utc::now()));
    }
}
