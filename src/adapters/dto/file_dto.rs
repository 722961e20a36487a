use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::models::file_record::FileRecord;

/// Record summary returned by the listing and upload endpoints. The access
/// token is only exposed embedded in `download_path`, ready for the caller
/// to follow; the raw storage name is never exposed.
#[derive(Debug, Serialize)]
pub struct FileResponse {
    #[serde(rename = "fileId")]
    pub file_id: Uuid,
    #[serde(rename = "originalFileName")]
    pub original_file_name: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "sizeBytes")]
    pub size_bytes: u64,
    #[serde(rename = "isSafe")]
    pub is_safe: bool,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(rename = "downloadPath")]
    pub download_path: String,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        let download_path = format!(
            "/api/v1/files/{}/content?token={}",
            record.id, record.access_token
        );
        Self {
            file_id: record.id,
            original_file_name: record.original_file_name,
            content_type: record.content_type,
            size_bytes: record.size_bytes,
            is_safe: record.is_safe,
            uploaded_at: record.uploaded_at,
            download_path,
        }
    }
}
