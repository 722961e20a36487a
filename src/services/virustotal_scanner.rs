use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Body, Client};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::{
    application::services::scanner_service::{ScanError, ScannerService, Verdict},
    domain::models::spool::FileSpool,
};

const DEFAULT_BASE_URL: &str = "https://www.virustotal.com/api/v3";
const POLL_ATTEMPTS: u32 = 10;
const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Remote-vendor scanner backed by the VirusTotal v3 API: uploads the
/// content, polls the analysis, and treats any malicious finding as infected.
/// Zero malicious findings is an explicit clean verdict, not "unknown".
/// Every transport or protocol failure maps to `ScanError::Unavailable`.
pub struct VirusTotalScanner {
    client: Client,
    api_key: String,
    base_url: String,
}

impl VirusTotalScanner {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn submit(&self, file_name: &str, content: &FileSpool) -> Result<String, ScanError> {
        let file = tokio::fs::File::open(content.path())
            .await
            .map_err(|e| ScanError::Unavailable(e.to_string()))?;
        let body = Body::wrap_stream(ReaderStream::new(file));
        let part = multipart::Part::stream_with_length(body, content.size())
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| ScanError::Unavailable(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/files", self.base_url))
            .header("x-apikey", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ScanError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScanError::Unavailable(format!(
                "upload failed with status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ScanError::Unavailable(e.to_string()))?;

        body["data"]["id"]
            .as_str()
            .map(|id| id.to_string())
            .ok_or_else(|| ScanError::Unavailable("missing analysis id in response".to_string()))
    }

    async fn poll_analysis(&self, analysis_id: &str) -> Result<Verdict, ScanError> {
        for attempt in 0..POLL_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(POLL_INTERVAL).await;
            }

            let response = self
                .client
                .get(format!("{}/analyses/{}", self.base_url, analysis_id))
                .header("x-apikey", &self.api_key)
                .send()
                .await
                .map_err(|e| ScanError::Unavailable(e.to_string()))?;

            if !response.status().is_success() {
                return Err(ScanError::Unavailable(format!(
                    "analysis lookup failed with status {}",
                    response.status()
                )));
            }

            let body: serde_json::Value = response
                .json()
                .await
                .map_err(|e| ScanError::Unavailable(e.to_string()))?;

            let attributes = &body["data"]["attributes"];
            if attributes["status"].as_str() == Some("completed") {
                let malicious = attributes["stats"]["malicious"].as_u64().unwrap_or(0);
                debug!(analysis_id, malicious, "analysis completed");
                return Ok(if malicious > 0 {
                    Verdict::Infected(format!("{} engines flagged the file as malicious", malicious))
                } else {
                    Verdict::Clean
                });
            }
        }

        Err(ScanError::Unavailable(format!(
            "analysis {} did not complete after {} attempts",
            analysis_id, POLL_ATTEMPTS
        )))
    }
}

#[async_trait]
impl ScannerService for VirusTotalScanner {
    fn name(&self) -> &'static str {
        "virustotal"
    }

    async fn scan(&self, file_name: &str, content: &FileSpool) -> Result<Verdict, ScanError> {
        let analysis_id = self.submit(file_name, content).await?;
        self.poll_analysis(&analysis_id).await
    }
}
