//! Remember-me token service. Issues a long-lived opaque token whose
//! digest is stored against the user row; the raw token only ever lives in
//! the client cookie. Verification failures of any kind collapse to
//! "absent" — this is a convenience path, not an error surface.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::models::user::User;
use crate::repositories::user as user_repo;
use crate::utils::token;

/// Generates a fresh token for the user and persists its digest together
/// with the expiry. A prior token is overwritten (last-writer-wins).
/// Returns the raw token destined for the cookie.
pub async fn issue(pool: &PgPool, user_id: &str, ttl_days: u64) -> Result<String, sqlx::Error> {
    let raw_token = token::generate();
    let expires_at = Utc::now() + Duration::days(ttl_days as i64);
    user_repo::set_remember_token(pool, user_id, &token::digest(&raw_token), expires_at).await?;
    Ok(raw_token)
}

/// Resolves a presented token to its user, or `None` when the token is
/// unknown, expired, or the lookup fails. Lookup errors are logged and
/// swallowed so the caller falls through to normal login.
pub async fn verify(pool: &PgPool, raw_token: &str) -> Option<User> {
    let now = Utc::now();
    match user_repo::find_user_by_remember_token(pool, &token::digest(raw_token), now).await {
        Ok(found) => found.filter(|user| user.has_valid_remember_token(now)),
        Err(err) => {
            tracing::warn!(error = %err, "remember-me lookup failed; treating token as absent");
            None
        }
    }
}

/// Clears the stored token and expiry. Used on explicit logout.
pub async fn revoke(pool: &PgPool, user_id: &str) -> Result<(), sqlx::Error> {
    user_repo::clear_remember_token(pool, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration as StdDuration;

    #[tokio::test]
    async fn verify_swallows_lookup_failures() {
        // An unreachable database must read as "no token", never an error.
        let pool = PgPoolOptions::new()
            .acquire_timeout(StdDuration::from_millis(250))
            .connect_lazy("postgres://127.0.0.1:1/unreachable")
            .expect("lazy pool");
        assert!(verify(&pool, "any-token").await.is_none());
    }
}
