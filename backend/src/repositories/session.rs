use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::session::Session;

const SESSION_COLUMNS: &str = "id, user_id, csrf_token, created_at, last_seen_at, expires_at";

pub async fn create_session(
    pool: &PgPool,
    user_id: &str,
    expires_at: DateTime<Utc>,
) -> Result<Session, sqlx::Error> {
    let session_id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query_as::<_, Session>(&format!(
        "INSERT INTO sessions (id, user_id, created_at, last_seen_at, expires_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {SESSION_COLUMNS}"
    ))
    .bind(&session_id)
    .bind(user_id)
    .bind(now)
    .bind(now)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

pub async fn find_valid_session(
    pool: &PgPool,
    session_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>(&format!(
        "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1 AND expires_at > $2"
    ))
    .bind(session_id)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn touch_session(
    pool: &PgPool,
    session_id: &str,
    last_seen_at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE sessions SET last_seen_at = $1 WHERE id = $2")
        .bind(last_seen_at)
        .bind(session_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Persists a freshly generated CSRF token, but only when the session has
/// none yet; the stored token wins over a concurrent writer.
pub async fn set_csrf_token_if_absent(
    pool: &PgPool,
    session_id: &str,
    csrf_token: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE sessions SET csrf_token = $1 WHERE id = $2 AND csrf_token IS NULL",
    )
    .bind(csrf_token)
    .bind(session_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn find_session_by_id(
    pool: &PgPool,
    session_id: &str,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>(&format!(
        "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"
    ))
    .bind(session_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_session(pool: &PgPool, session_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(session_id)
        .execute(pool)
        .await
        .map(|_| ())
}

/// Deletes every other session a user holds, keeping the one that made the
/// request. Used after a password change.
pub async fn delete_other_sessions_for_user(
    pool: &PgPool,
    user_id: &str,
    keep_session_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND id <> $2")
        .bind(user_id)
        .bind(keep_session_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_expired_sessions(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at < $1")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
