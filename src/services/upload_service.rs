use uuid::Uuid;

use crate::{
    config::UploadConfig,
    dto::upload::UploadedFile,
    error::{AppError, AppResult},
    response::ApiResponse,
};

pub const UPLOAD_URL_PREFIX: &str = "/uploads";
pub const FILE_TOO_LARGE: &str = "file too large";

/// Content types accepted for upload, with the extension used on disk.
const ACCEPTED: &[(&[u8], &str, &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png", "png"),
    (b"\xFF\xD8\xFF", "image/jpeg", "jpg"),
    (b"%PDF-", "application/pdf", "pdf"),
];

/// Sniff the content type from the leading bytes.
pub fn sniff_content_type(bytes: &[u8]) -> Option<(&'static str, &'static str)> {
    ACCEPTED
        .iter()
        .find(|(magic, _, _)| bytes.starts_with(magic))
        .map(|(_, mime, ext)| (*mime, *ext))
}

pub fn check_upload(config: &UploadConfig, bytes: &[u8]) -> AppResult<(&'static str, &'static str)> {
    if bytes.len() > config.max_bytes {
        return Err(AppError::BadRequest(FILE_TOO_LARGE.into()));
    }
    sniff_content_type(bytes).ok_or_else(|| {
        AppError::BadRequest("type of file invalid. only png, jpg, jpeg, and pdf.".into())
    })
}

pub async fn store_upload(
    config: &UploadConfig,
    bytes: &[u8],
) -> AppResult<ApiResponse<UploadedFile>> {
    let (content_type, ext) = check_upload(config, bytes)?;

    tokio::fs::create_dir_all(&config.dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("creating upload dir: {e}")))?;

    let file_name = format!("{}.{ext}", Uuid::new_v4());
    let path = config.dir.join(&file_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("writing {}: {e}", path.display())))?;

    tracing::info!(file = %file_name, size = bytes.len(), content_type, "file uploaded");
    Ok(ApiResponse::created(
        "File uploaded successfully",
        UploadedFile {
            url: format!("{UPLOAD_URL_PREFIX}/{file_name}"),
            content_type: content_type.to_string(),
            size: bytes.len(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_accepted_types() {
        assert_eq!(
            sniff_content_type(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            Some(("image/png", "png"))
        );
        assert_eq!(
            sniff_content_type(b"\xFF\xD8\xFF\xE0\0\x10JFIF"),
            Some(("image/jpeg", "jpg"))
        );
        assert_eq!(
            sniff_content_type(b"%PDF-1.7\n"),
            Some(("application/pdf", "pdf"))
        );
        assert_eq!(sniff_content_type(b"GIF89a"), None);
        assert_eq!(sniff_content_type(b""), None);
    }

    #[test]
    fn size_is_checked_before_type() {
        let config = UploadConfig {
            max_bytes: 4,
            ..UploadConfig::default()
        };
        let err = check_upload(&config, b"not an image").unwrap_err();
        assert_eq!(err.to_string(), "file too large");
    }
}
