use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    routing::post,
};

use crate::{
    config::UploadConfig,
    dto::upload::{UploadForm, UploadedFile},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::upload_service::{self, FILE_TOO_LARGE},
    state::AppState,
};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Body limit for the upload route. The file part is cut off as soon as it
/// passes the configured maximum, so this only bounds the other form parts.
fn body_limit(config: &UploadConfig) -> usize {
    config.max_bytes.saturating_mul(2).saturating_add(MULTIPART_OVERHEAD)
}

pub fn router(config: &UploadConfig) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit(config)))
}

#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = ApiResponse<UploadedFile>),
        (status = 400, description = "Missing file, too large, or unsupported type")
    ),
    security(("bearer_auth" = [])),
    tag = "Upload"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UploadedFile>> {
    let max_bytes = state.upload.max_bytes;
    let mut file: Option<Vec<u8>> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if data.len() + chunk.len() > max_bytes {
                tracing::debug!(user_id = user.user_id, max_bytes, "upload over size limit");
                return Err(AppError::BadRequest(FILE_TOO_LARGE.into()));
            }
            data.extend_from_slice(&chunk);
        }
        file = Some(data);
    }

    let data = file.ok_or_else(|| AppError::BadRequest("file is required".into()))?;
    tracing::debug!(user_id = user.user_id, size = data.len(), "upload received");
    upload_service::store_upload(&state.upload, &data).await
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::BadRequest(FILE_TOO_LARGE.into())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
