use std::path::Path;

use axum::{
    extract::{Extension, Multipart, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{envelope::ApiEnvelope, user::User},
    state::AppState,
    utils::sanitize::sanitize,
};

#[derive(Debug, Serialize)]
pub struct UploadData {
    pub file_name: String,
    pub size: u64,
}

/// Accepts a multipart form with a `file` field and stores it under the
/// configured uploads directory. Progress reporting happens client-side;
/// the server answers once with the standard envelope.
pub async fn upload(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<Json<ApiEnvelope<UploadData>>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Malformed multipart payload: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field
            .file_name()
            .map(sanitize)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "upload".to_string());
        // Only the final path component of the client-supplied name is kept.
        let base_name = original_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or("upload")
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("Failed to read upload: {err}")))?;

        let stored_name = format!("{}-{}", Uuid::new_v4(), base_name);
        let target = Path::new(&state.config.uploads_dir).join(&stored_name);

        tokio::fs::create_dir_all(&state.config.uploads_dir)
            .await
            .map_err(|err| AppError::Internal(err.into()))?;
        tokio::fs::write(&target, &data)
            .await
            .map_err(|err| AppError::Internal(err.into()))?;

        tracing::info!(
            user_id = %user.id,
            file = %stored_name,
            size = data.len(),
            "file uploaded"
        );
        return Ok(Json(ApiEnvelope::ok(
            UploadData {
                file_name: stored_name,
                size: data.len() as u64,
            },
            "Upload complete",
        )));
    }

    Err(AppError::BadRequest(
        "Multipart payload is missing a \"file\" field".to_string(),
    ))
}
