use axum::{
    extract::{Extension, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::{
    error::AppError,
    middleware::auth::AuthOutcome,
    models::{
        envelope::ApiEnvelope,
        session::Session,
        user::{
            ChangePasswordRequest, LoginRequest, RegisterRequest, User, UserResponse, UserRole,
        },
    },
    repositories::{session as session_repo, user as user_repo},
    services::{csrf, remember_me},
    state::AppState,
    utils::{
        cookies::{
            build_clear_cookie, build_cookie, REMEMBER_COOKIE_NAME, REMEMBER_COOKIE_PATH,
            SESSION_COOKIE_NAME, SESSION_COOKIE_PATH,
        },
        password::{hash_password, verify_password},
        sanitize::sanitize,
    },
    validation::rules,
};

/// Single generic message for every credential failure so responses do not
/// reveal which factor was wrong.
const GENERIC_LOGIN_ERROR: &str = "Invalid email or password";

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub user: UserResponse,
    pub csrf_token: String,
}

#[derive(Debug, Serialize)]
pub struct MeData {
    pub user: UserResponse,
    /// Which factor authenticated this request: `session` or
    /// `remember_token`.
    pub authenticated_via: String,
}

#[derive(Debug, Serialize)]
pub struct CsrfData {
    pub csrf_token: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<UserResponse>>), AppError> {
    payload.full_name = sanitize(&payload.full_name);
    payload.email = sanitize(&payload.email);
    payload.phone = payload.phone.as_deref().map(sanitize).filter(|p| !p.is_empty());
    payload.validate()?;

    let password_hash = hash_password(&payload.password).map_err(AppError::Internal)?;
    let user = User::new(
        payload.full_name,
        payload.email,
        UserRole::Student,
        payload.phone,
        password_hash,
    );

    match user_repo::insert_user(&state.pool, &user).await {
        Ok(()) => {}
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }
        Err(err) => return Err(err.into()),
    }

    tracing::info!(user_id = %user.id, "account created");
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok(UserResponse::from(user), "Account created")),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let email = sanitize(&payload.email);
    let user = user_repo::find_user_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(GENERIC_LOGIN_ERROR.to_string()))?;

    let matches =
        verify_password(&payload.password, &user.password_hash).map_err(AppError::Internal)?;
    if !matches {
        return Err(AppError::Unauthorized(GENERIC_LOGIN_ERROR.to_string()));
    }

    let expires_at = Utc::now() + Duration::hours(state.config.session_ttl_hours as i64);
    let session = session_repo::create_session(&state.pool, &user.id, expires_at).await?;
    let csrf_token = csrf::ensure_token(&state.pool, &session).await?;

    let options = state.config.cookie_options();
    let mut cookies = vec![build_cookie(
        SESSION_COOKIE_NAME,
        &session.id,
        state.config.session_ttl(),
        SESSION_COOKIE_PATH,
        options,
    )];

    // The remember-me token is a convenience: a storage failure downgrades
    // the login rather than failing it.
    if payload.remember {
        match remember_me::issue(&state.pool, &user.id, state.config.remember_token_days).await {
            Ok(raw_token) => cookies.push(build_cookie(
                REMEMBER_COOKIE_NAME,
                &raw_token,
                state.config.remember_ttl(),
                REMEMBER_COOKIE_PATH,
                options,
            )),
            Err(err) => {
                tracing::warn!(error = %err, user_id = %user.id, "failed to issue remember-me token");
            }
        }
    }

    tracing::info!(user_id = %user.id, "user logged in");
    let body = ApiEnvelope::ok(
        LoginData {
            user: user.into(),
            csrf_token,
        },
        "Logged in",
    );
    Ok(with_cookies(Json(body).into_response(), &cookies))
}

pub async fn me(
    Extension(user): Extension<User>,
    Extension(outcome): Extension<AuthOutcome>,
) -> Json<ApiEnvelope<MeData>> {
    Json(ApiEnvelope::ok(
        MeData {
            user: user.into(),
            authenticated_via: outcome.as_str().to_string(),
        },
        "OK",
    ))
}

pub async fn csrf_token(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiEnvelope<CsrfData>>, AppError> {
    let csrf_token = csrf::ensure_token(&state.pool, &session).await?;
    Ok(Json(ApiEnvelope::ok(CsrfData { csrf_token }, "OK")))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    session_repo::delete_session(&state.pool, &session.id).await?;
    remember_me::revoke(&state.pool, &user.id).await?;

    let options = state.config.cookie_options();
    let cookies = [
        build_clear_cookie(SESSION_COOKIE_NAME, SESSION_COOKIE_PATH, options),
        build_clear_cookie(REMEMBER_COOKIE_NAME, REMEMBER_COOKIE_PATH, options),
    ];

    tracing::info!(user_id = %user.id, "user logged out");
    let body = ApiEnvelope::<Value>::message("Logged out");
    Ok(with_cookies(Json(body).into_response(), &cookies))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(session): Extension<Session>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiEnvelope<Value>>, AppError> {
    if rules::validate_password(&payload.new_password).is_err() {
        return Err(AppError::BadRequest(
            "New password must be at least 8 characters with a letter and a digit".to_string(),
        ));
    }
    if payload.new_password == payload.current_password {
        return Err(AppError::BadRequest(
            "New password must differ from current password".to_string(),
        ));
    }

    let matches = verify_password(&payload.current_password, &user.password_hash)
        .map_err(AppError::Internal)?;
    if !matches {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let new_hash = hash_password(&payload.new_password).map_err(AppError::Internal)?;
    user_repo::update_password(&state.pool, &user.id, &new_hash).await?;

    // Other sessions and the remember-me token stop working; the session
    // that made the change stays.
    let revoked =
        session_repo::delete_other_sessions_for_user(&state.pool, &user.id, &session.id).await?;
    remember_me::revoke(&state.pool, &user.id).await?;

    tracing::info!(user_id = %user.id, revoked_sessions = revoked, "password changed");
    Ok(Json(ApiEnvelope::message("Password updated")))
}

fn with_cookies(mut response: Response, cookies: &[String]) -> Response {
    for cookie in cookies {
        if let Ok(value) = HeaderValue::from_str(cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}
