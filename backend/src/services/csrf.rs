//! Per-session CSRF token guard. A token is minted once per session and
//! kept for the session's lifetime; state-changing requests must echo it
//! back in the `x-csrf-token` header.

use sqlx::PgPool;

use crate::models::session::Session;
use crate::repositories::session as session_repo;
use crate::utils::token;

/// Returns the session's CSRF token, minting and persisting one on first
/// use. Idempotent: repeated calls for the same session yield the same
/// token.
pub async fn ensure_token(pool: &PgPool, session: &Session) -> Result<String, sqlx::Error> {
    if let Some(existing) = &session.csrf_token {
        return Ok(existing.clone());
    }

    let fresh = token::generate();
    if session_repo::set_csrf_token_if_absent(pool, &session.id, &fresh).await? {
        return Ok(fresh);
    }

    // A concurrent request seeded the token first; read the winner back.
    session_repo::find_session_by_id(pool, &session.id)
        .await?
        .and_then(|s| s.csrf_token)
        .ok_or(sqlx::Error::RowNotFound)
}

/// True iff the session holds a token and the submitted value equals it
/// under a comparison whose timing does not track byte position.
pub fn verify(session: &Session, submitted: &str) -> bool {
    match session.csrf_token.as_deref() {
        Some(expected) => token::fixed_time_eq(expected, submitted),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn session_with_token(csrf_token: Option<&str>) -> Session {
        let now = Utc::now();
        Session {
            id: "sess".into(),
            user_id: "user".into(),
            csrf_token: csrf_token.map(str::to_string),
            created_at: now,
            last_seen_at: None,
            expires_at: now + Duration::hours(1),
        }
    }

    #[test]
    fn verify_accepts_the_stored_token() {
        let session = session_with_token(Some("expected-token"));
        assert!(verify(&session, "expected-token"));
    }

    #[test]
    fn verify_rejects_mismatches() {
        let session = session_with_token(Some("expected-token"));
        assert!(!verify(&session, "wrong"));
        assert!(!verify(&session, ""));
    }

    #[test]
    fn verify_rejects_sessions_without_a_token() {
        let session = session_with_token(None);
        assert!(!verify(&session, "anything"));
    }

    #[tokio::test]
    async fn ensure_token_is_idempotent_for_a_seeded_session() {
        // A session that already holds a token never reaches the database.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");
        let session = session_with_token(Some("seeded-token"));

        let first = ensure_token(&pool, &session).await.expect("first call");
        let second = ensure_token(&pool, &session).await.expect("second call");
        assert_eq!(first, "seeded-token");
        assert_eq!(first, second);
        assert!(verify(&session, &first));
        assert!(!verify(&session, "wrong"));
    }
}
