use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::spool::FileSpool;

/// Outcome of a content scan. Distinct from scanner unavailability, which is
/// an operational failure rather than a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    Infected(String),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scanner unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ScannerService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn scan(&self, file_name: &str, content: &FileSpool) -> Result<Verdict, ScanError>;
}
