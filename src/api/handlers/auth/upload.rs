//! Profile picture upload.

use axum::{
    extract::Multipart,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use sqlx::PgPool;
use std::{
    path::Path,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{info, instrument};

use crate::api::handlers::ApiError;

use super::{principal::require_auth, state::AuthState, storage, types::UploadResponse};

const PROFILE_PIC_SUBDIR: &str = "profilePics";

/// Store an uploaded profile picture and record its public path.
///
/// The first multipart field carrying a filename is taken as the image; the
/// stored name is prefixed with a millisecond timestamp so re-uploads never
/// collide.
#[utoipa::path(
    post,
    path = "/auth/upload-dp",
    tag = "auth",
    security(("bearer" = [])),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Picture stored", body = UploadResponse),
        (status = 400, description = "No file in request", body = ApiError),
        (status = 401, description = "Invalid or missing token", body = ApiError),
    )
)]
#[instrument(skip_all)]
pub async fn upload_profile_pic(
    Extension(state): Extension<Arc<AuthState>>,
    Extension(pool): Extension<PgPool>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let principal = require_auth(&headers, &state)?;

    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(format!("Malformed multipart body: {err}")))?
    {
        if let Some(file_name) = field.file_name().map(sanitize_filename) {
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::bad_request(format!("Could not read upload: {err}")))?;
            file = Some((file_name, bytes.to_vec()));
            break;
        }
    }

    let Some((file_name, bytes)) = file else {
        return Err(ApiError::bad_request("No file uploaded"));
    };

    if bytes.is_empty() {
        return Err(ApiError::bad_request("Uploaded file is empty"));
    }

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| ApiError::internal(err.into()))?
        .as_millis();
    let stored_name = format!("{millis}-{file_name}");

    let dir = Path::new(state.config().uploads_dir()).join(PROFILE_PIC_SUBDIR);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|err| ApiError::internal(err.into()))?;
    tokio::fs::write(dir.join(&stored_name), &bytes)
        .await
        .map_err(|err| ApiError::internal(err.into()))?;

    let public_path = format!("uploads/{PROFILE_PIC_SUBDIR}/{stored_name}");

    storage::set_profile_pic(&pool, principal.user_id, &public_path)
        .await
        .map_err(|err| ApiError::internal(err.into()))?;

    info!("Profile picture stored for {}", principal.email);

    Ok((
        StatusCode::OK,
        Json(UploadResponse {
            message: "Profile picture updated".to_string(),
            path: public_path,
        }),
    ))
}

/// Keep only filesystem-safe characters; an all-unsafe name becomes "image".
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('_').is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_safe_names() {
        assert_eq!(sanitize_filename("avatar.png"), "avatar.png");
        assert_eq!(sanitize_filename("my pic (1).jpg"), "my_pic__1_.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
    }

    #[test]
    fn sanitize_defaults_unusable_names() {
        assert_eq!(sanitize_filename("???"), "image");
        assert_eq!(sanitize_filename(""), "image");
    }
}
