use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedFile {
    pub url: String,
    pub content_type: String,
    pub size: usize,
}

/// Multipart form accepted by the upload route; documentation only.
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
