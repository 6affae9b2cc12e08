use axum::Json;
use serde_json::Value;

use crate::models::envelope::ApiEnvelope;
use crate::utils::sanitize::sanitize_value;

/// Liveness endpoint used by clients to probe the API. Echoes the posted
/// JSON back, sanitized, inside the standard envelope.
pub async fn ping(Json(mut payload): Json<Value>) -> Json<ApiEnvelope<Value>> {
    sanitize_value(&mut payload);
    Json(ApiEnvelope::ok(payload, "pong"))
}
