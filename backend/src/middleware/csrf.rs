//! CSRF enforcement for state-changing routes. Runs after the auth
//! resolver, which leaves the session record in the request extensions.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::{error::AppError, models::session::Session, services::csrf};

pub const CSRF_HEADER: &str = "x-csrf-token";

pub async fn require_csrf(request: Request, next: Next) -> Result<Response, AppError> {
    let session = request
        .extensions()
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Please log in".to_string()))?;

    let submitted = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Forbidden("Missing CSRF token".to_string()))?;

    if !csrf::verify(&session, submitted) {
        return Err(AppError::Forbidden("Invalid CSRF token".to_string()));
    }

    Ok(next.run(request).await)
}
