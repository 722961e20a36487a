use async_trait::async_trait;

use crate::{
    application::services::scanner_service::{ScanError, ScannerService, Verdict},
    domain::models::spool::FileSpool,
};

/// Local, deterministic scanner: flags a file whose name matches a configured
/// suspicious pattern. A demo-grade stand-in for a real engine; it performs
/// no I/O and never becomes unavailable.
pub struct HeuristicScanner {
    patterns: Vec<String>,
}

impl HeuristicScanner {
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

#[async_trait]
impl ScannerService for HeuristicScanner {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn scan(&self, file_name: &str, _content: &FileSpool) -> Result<Verdict, ScanError> {
        let name = file_name.to_lowercase();
        for pattern in &self.patterns {
            if name.contains(pattern) {
                return Ok(Verdict::Infected(format!(
                    "file name matches suspicious pattern '{}'",
                    pattern
                )));
            }
        }
        Ok(Verdict::Clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spool() -> FileSpool {
        FileSpool::from_bytes(b"payload").await.unwrap()
    }

    #[tokio::test]
    async fn flags_name_containing_a_pattern() {
        let scanner = HeuristicScanner::new(vec!["virus".to_string()]);
        let verdict = scanner.scan("My-VIRUS-sample.exe", &spool().await).await.unwrap();
        assert!(matches!(verdict, Verdict::Infected(_)));
    }

    #[tokio::test]
    async fn clean_name_passes() {
        let scanner = HeuristicScanner::new(vec!["virus".to_string()]);
        let verdict = scanner.scan("report.pdf", &spool().await).await.unwrap();
        assert_eq!(verdict, Verdict::Clean);
    }

    #[tokio::test]
    async fn empty_patterns_never_flag() {
        let scanner = HeuristicScanner::new(vec![String::new()]);
        let verdict = scanner.scan("virus.exe", &spool().await).await.unwrap();
        assert_eq!(verdict, Verdict::Clean);
    }
}
