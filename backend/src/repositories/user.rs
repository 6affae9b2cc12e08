use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::user::User;

const USER_COLUMNS: &str = "id, full_name, email, role, phone, password_hash, \
     remember_token, remember_expires, created_at, updated_at";

pub async fn insert_user(pool: &PgPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, full_name, email, role, phone, password_hash, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&user.id)
    .bind(&user.full_name)
    .bind(&user.email)
    .bind(user.role.as_str())
    .bind(&user.phone)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_id(pool: &PgPool, user_id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Looks a user up by the digest of a presented remember-me token. The
/// expiry check lives in the query so an expired row never surfaces.
pub async fn find_user_by_remember_token(
    pool: &PgPool,
    token_digest: &str,
    now: DateTime<Utc>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users \
         WHERE remember_token = $1 AND remember_expires > $2"
    ))
    .bind(token_digest)
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// Stores a new remember-me token digest, overwriting any prior one
/// (last-writer-wins on concurrent logins).
pub async fn set_remember_token(
    pool: &PgPool,
    user_id: &str,
    token_digest: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET remember_token = $1, remember_expires = $2, updated_at = $3 \
         WHERE id = $4",
    )
    .bind(token_digest)
    .bind(expires_at)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn clear_remember_token(pool: &PgPool, user_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET remember_token = NULL, remember_expires = NULL, updated_at = $1 \
         WHERE id = $2",
    )
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn update_password(
    pool: &PgPool,
    user_id: &str,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $1, updated_at = $2 WHERE id = $3")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await
        .map(|_| ())
}

/// Nulls out remember-me tokens whose expiry has passed. Used by the
/// cleanup binary.
pub async fn clear_expired_remember_tokens(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET remember_token = NULL, remember_expires = NULL \
         WHERE remember_token IS NOT NULL AND remember_expires < $1",
    )
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
