use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{dto::file_record_dto::FileRecordDTO, error::ApplicationError},
    domain::models::file_record::FileRecord,
};

/// Durable store of file records. Implementations must provide single-record
/// atomicity for create and read; records are never updated.
#[async_trait]
pub trait FileRecordRepository: Send + Sync {
    async fn create(&self, record: FileRecordDTO) -> Result<FileRecord, ApplicationError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, ApplicationError>;
    /// All records, newest first.
    async fn list_all(&self) -> Result<Vec<FileRecord>, ApplicationError>;
}
