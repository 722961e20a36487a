use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::{
    application::{
        error::ApplicationError,
        repositories::FileRecordRepository,
        services::{
            storage_service::{ByteRange, ContentStream, StorageService},
            token_service::TokenService,
        },
    },
    domain::models::file_record::FileRecord,
};

pub struct DownloadContent {
    pub record: FileRecord,
    pub stream: ContentStream,
    /// Inclusive bounds actually served when the request carried a range.
    pub range: Option<(u64, u64)>,
}

/// Token-gated retrieval: authorizes a candidate token against the record and
/// streams the blob. Reads mutate nothing; repeating a request returns the
/// same content.
pub struct DownloadService {
    records: Arc<dyn FileRecordRepository>,
    storage: Arc<dyn StorageService>,
    tokens: TokenService,
}

impl DownloadService {
    pub fn new(
        records: Arc<dyn FileRecordRepository>,
        storage: Arc<dyn StorageService>,
        tokens: TokenService,
    ) -> Self {
        Self {
            records,
            storage,
            tokens,
        }
    }

    pub async fn retrieve(
        &self,
        id: Uuid,
        candidate_token: &str,
        requested: Option<ByteRange>,
    ) -> Result<DownloadContent, ApplicationError> {
        if candidate_token.trim().is_empty() {
            return Err(ApplicationError::BadRequest("Missing token".to_string()));
        }

        let record = self
            .records
            .get_by_id(id)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        if !self.tokens.verify(candidate_token, &record.access_token) {
            warn!(file_id = %id, "access token mismatch");
            return Err(ApplicationError::Unauthorized);
        }

        let resolved = match requested {
            Some(range) => Some(
                range
                    .resolve(record.size_bytes)
                    .ok_or(ApplicationError::RangeNotSatisfiable)?,
            ),
            None => None,
        };

        let storage_range = resolved.map(|(start, end)| ByteRange {
            start,
            end: Some(end),
        });
        let stream = self.storage.get(&record.stored_name, storage_range).await?;

        Ok(DownloadContent {
            record,
            stream,
            range: resolved,
        })
    }
}
