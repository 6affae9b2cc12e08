//! Request authentication resolver. Resolution is a two-step chain: an
//! active session wins, otherwise a remember-me token silently
//! re-establishes one. The winning step is recorded as a tagged
//! [`AuthOutcome`] so handlers can tell the factors apart instead of
//! seeing a flattened boolean.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};

use crate::{
    error::AppError,
    models::{session::Session, user::User},
    repositories::{session as session_repo, user as user_repo},
    services::remember_me,
    state::AppState,
    utils::cookies::{
        build_cookie, extract_cookie_value, REMEMBER_COOKIE_NAME, SESSION_COOKIE_NAME,
        SESSION_COOKIE_PATH,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which authentication factor satisfied the request.
pub enum AuthOutcome {
    /// An active server-side session matched the session cookie.
    Session,
    /// A remember-me token re-established a fresh session.
    RememberToken,
}

impl AuthOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthOutcome::Session => "session",
            AuthOutcome::RememberToken => "remember_token",
        }
    }
}

struct ResolvedAuth {
    user: User,
    session: Session,
    outcome: AuthOutcome,
}

pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let cookie_header = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned());

    let resolved = resolve(&state, cookie_header.as_deref())
        .await?
        .ok_or_else(|| AppError::Unauthorized("Please log in".to_string()))?;

    request.extensions_mut().insert(resolved.user.clone());
    request.extensions_mut().insert(resolved.session.clone());
    request.extensions_mut().insert(resolved.outcome);

    let mut response = next.run(request).await;

    // A session minted from the remember-me cookie has to reach the client.
    if resolved.outcome == AuthOutcome::RememberToken {
        let cookie = build_cookie(
            SESSION_COOKIE_NAME,
            &resolved.session.id,
            state.config.session_ttl(),
            SESSION_COOKIE_PATH,
            state.config.cookie_options(),
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    Ok(response)
}

async fn resolve(
    state: &AppState,
    cookie_header: Option<&str>,
) -> Result<Option<ResolvedAuth>, AppError> {
    let Some(header) = cookie_header else {
        return Ok(None);
    };

    if let Some(session_id) = extract_cookie_value(header, SESSION_COOKIE_NAME) {
        if let Some(resolved) = resolve_session(state, &session_id).await? {
            return Ok(Some(resolved));
        }
    }

    if let Some(raw_token) = extract_cookie_value(header, REMEMBER_COOKIE_NAME) {
        if let Some(resolved) = resolve_remember_token(state, &raw_token).await? {
            return Ok(Some(resolved));
        }
    }

    Ok(None)
}

async fn resolve_session(
    state: &AppState,
    session_id: &str,
) -> Result<Option<ResolvedAuth>, AppError> {
    let now = Utc::now();
    let Some(session) = session_repo::find_valid_session(&state.pool, session_id, now).await?
    else {
        return Ok(None);
    };
    let Some(user) = user_repo::find_user_by_id(&state.pool, &session.user_id).await? else {
        return Ok(None);
    };

    if let Err(err) = session_repo::touch_session(&state.pool, &session.id, now).await {
        tracing::warn!(error = %err, session_id = %session.id, "failed to touch session");
    }

    Ok(Some(ResolvedAuth {
        user,
        session,
        outcome: AuthOutcome::Session,
    }))
}

async fn resolve_remember_token(
    state: &AppState,
    raw_token: &str,
) -> Result<Option<ResolvedAuth>, AppError> {
    let Some(user) = remember_me::verify(&state.pool, raw_token).await else {
        return Ok(None);
    };

    let expires_at = Utc::now() + Duration::hours(state.config.session_ttl_hours as i64);
    let session = session_repo::create_session(&state.pool, &user.id, expires_at).await?;
    tracing::debug!(user_id = %user.id, "session re-established from remember-me token");

    Ok(Some(ResolvedAuth {
        user,
        session,
        outcome: AuthOutcome::RememberToken,
    }))
}
