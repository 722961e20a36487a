mod composite_scanner;
mod error;
mod heuristic_scanner;
mod memory_storage;
mod s3_storage;
mod virustotal_scanner;

pub use composite_scanner::CompositeScanner;
pub use error::StorageError;
pub use heuristic_scanner::HeuristicScanner;
pub use memory_storage::MemoryStorageService;
pub use s3_storage::S3StorageService;
pub use virustotal_scanner::VirusTotalScanner;

use std::sync::Arc;

use crate::{
    application::services::{ScannerService, StorageService},
    domain::config::{ConfigError, ScannerConfig, ScannerVariant, StorageConfig, StorageProvider},
};

pub async fn create_storage_service(
    config: &StorageConfig,
) -> Result<Arc<dyn StorageService>, StorageError> {
    match config.provider {
        StorageProvider::S3 => {
            let s3_config = config.s3.as_ref().ok_or_else(|| {
                StorageError::InvalidConfig("S3 settings not configured".to_string())
            })?;

            let service = S3StorageService::new(s3_config);
            service.ensure_bucket().await?;
            Ok(Arc::new(service))
        }
        StorageProvider::Memory => Ok(Arc::new(MemoryStorageService::new())),
    }
}

/// Build the configured scanner. A single variant is used directly; several
/// variants are composed so that every one of them must report clean.
pub fn create_scanner_service(
    config: &ScannerConfig,
) -> Result<Arc<dyn ScannerService>, ConfigError> {
    let mut scanners: Vec<Arc<dyn ScannerService>> = Vec::new();

    for variant in &config.variants {
        match variant {
            ScannerVariant::Heuristic => scanners.push(Arc::new(HeuristicScanner::new(
                config.suspicious_patterns.clone(),
            ))),
            ScannerVariant::VirusTotal => {
                let api_key = config
                    .virustotal_api_key
                    .clone()
                    .ok_or(ConfigError::MissingVar("VIRUSTOTAL_API_KEY"))?;
                scanners.push(Arc::new(VirusTotalScanner::new(api_key)));
            }
        }
    }

    match scanners.len() {
        0 => Err(ConfigError::InvalidVar(
            "SCANNER_VARIANTS",
            "at least one scanner variant must be configured".to_string(),
        )),
        1 => Ok(scanners.remove(0)),
        _ => Ok(Arc::new(CompositeScanner::new(scanners))),
    }
}
