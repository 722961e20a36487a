use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        error::ApplicationError,
        repositories::FileRecordRepository,
        services::{
            scanner_service::{ScanError, ScannerService, Verdict},
            storage_service::StorageService,
            token_service::TokenService,
            validation::UploadValidator,
        },
    },
    domain::{
        config::UploadPolicy,
        models::{file_record::FileRecord, upload::IncomingFile},
    },
};

/// Sequences the admission pipeline: validate, scan, store, mint token,
/// persist. Each stage's failure aborts the upload; nothing is written to
/// storage before the scan verdict is clean.
pub struct UploadService {
    validator: UploadValidator,
    scanner: Arc<dyn ScannerService>,
    storage: Arc<dyn StorageService>,
    records: Arc<dyn FileRecordRepository>,
    tokens: TokenService,
    fail_open: bool,
}

impl UploadService {
    pub fn new(
        policy: UploadPolicy,
        scanner: Arc<dyn ScannerService>,
        storage: Arc<dyn StorageService>,
        records: Arc<dyn FileRecordRepository>,
        tokens: TokenService,
        fail_open: bool,
    ) -> Self {
        Self {
            validator: UploadValidator::new(policy),
            scanner,
            storage,
            records,
            tokens,
            fail_open,
        }
    }

    pub async fn upload(&self, file: IncomingFile) -> Result<FileRecord, ApplicationError> {
        self.validator.validate(&file)?;

        let scanned_clean = match self.scanner.scan(&file.file_name, &file.spool).await {
            Ok(Verdict::Clean) => true,
            Ok(Verdict::Infected(reason)) => {
                info!(
                    file_name = %file.file_name,
                    reason = %reason,
                    "upload rejected by scanner"
                );
                return Err(ApplicationError::Unsafe(reason));
            }
            Err(ScanError::Unavailable(msg)) => {
                if self.fail_open {
                    warn!(
                        scanner = self.scanner.name(),
                        error = %msg,
                        "scanner unavailable, admitting unscanned content (fail-open)"
                    );
                    false
                } else {
                    return Err(ApplicationError::ScannerUnavailable(msg));
                }
            }
        };

        let id = Uuid::new_v4();
        let stored_name = format!("{}{}", id, file.normalized_extension());
        let content_type = file.normalized_content_type();
        let size_bytes = file.size();

        self.storage
            .put(&stored_name, &content_type, &file.spool)
            .await?;

        let record = FileRecord {
            id,
            original_file_name: file.file_name,
            stored_name: stored_name.clone(),
            content_type,
            size_bytes,
            is_safe: scanned_clean,
            access_token: self.tokens.mint(),
            uploaded_at: Utc::now(),
        };

        match self.records.create(record.into()).await {
            Ok(created) => {
                info!(
                    file_id = %created.id,
                    stored_name = %created.stored_name,
                    size_bytes = created.size_bytes,
                    "file admitted"
                );
                Ok(created)
            }
            Err(err) => {
                // The blob was already written; best-effort removal so the
                // failure does not leave an orphan.
                if let Err(cleanup_err) = self.storage.delete(&stored_name).await {
                    error!(
                        stored_name = %stored_name,
                        error = ?cleanup_err,
                        "orphaned blob left behind after persistence failure"
                    );
                }
                Err(err)
            }
        }
    }
}
