use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::file_record::FileRecord;

/// Row shape of the `file_records` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileRecordDTO {
    pub id: Uuid,
    pub original_file_name: String,
    pub stored_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub is_safe: bool,
    pub access_token: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<FileRecord> for FileRecordDTO {
    fn from(record: FileRecord) -> Self {
        FileRecordDTO {
            id: record.id,
            original_file_name: record.original_file_name,
            stored_name: record.stored_name,
            content_type: record.content_type,
            size_bytes: record.size_bytes as i64,
            is_safe: record.is_safe,
            access_token: record.access_token,
            uploaded_at: record.uploaded_at,
        }
    }
}

impl From<FileRecordDTO> for FileRecord {
    fn from(dto: FileRecordDTO) -> Self {
        FileRecord {
            id: dto.id,
            original_file_name: dto.original_file_name,
            stored_name: dto.stored_name,
            content_type: dto.content_type,
            size_bytes: dto.size_bytes.max(0) as u64,
            is_safe: dto.is_safe,
            access_token: dto.access_token,
            uploaded_at: dto.uploaded_at,
        }
    }
}
