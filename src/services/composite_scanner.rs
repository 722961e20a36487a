use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    application::services::scanner_service::{ScanError, ScannerService, Verdict},
    domain::models::spool::FileSpool,
};

/// Explicit composition policy when several scanners are configured: every
/// scanner runs and must report clean. An infected verdict from any scanner
/// rejects the file even when another scanner was unavailable; the scan is
/// unavailable only when no scanner flagged the file and at least one could
/// not answer.
pub struct CompositeScanner {
    scanners: Vec<Arc<dyn ScannerService>>,
}

impl CompositeScanner {
    pub fn new(scanners: Vec<Arc<dyn ScannerService>>) -> Self {
        Self { scanners }
    }
}

#[async_trait]
impl ScannerService for CompositeScanner {
    fn name(&self) -> &'static str {
        "composite"
    }

    async fn scan(&self, file_name: &str, content: &FileSpool) -> Result<Verdict, ScanError> {
        let mut outage: Option<ScanError> = None;

        for scanner in &self.scanners {
            match scanner.scan(file_name, content).await {
                Ok(Verdict::Clean) => {}
                Ok(Verdict::Infected(reason)) => {
                    return Ok(Verdict::Infected(format!("{}: {}", scanner.name(), reason)));
                }
                Err(ScanError::Unavailable(msg)) => {
                    if outage.is_none() {
                        outage = Some(ScanError::Unavailable(format!(
                            "{}: {}",
                            scanner.name(),
                            msg
                        )));
                    }
                }
            }
        }

        match outage {
            Some(err) => Err(err),
            None => Ok(Verdict::Clean),
        }
    }
}
