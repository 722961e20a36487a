use thiserror::Error;

const DEFAULT_MAX_SIZE_MB: u64 = 500;
const DEFAULT_SUSPICIOUS_PATTERN: &str = "virus";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    S3,
    Memory,
}

impl StorageProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageProvider::S3 => "s3",
            StorageProvider::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO etc.).
    pub endpoint: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub s3: Option<S3Config>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerVariant {
    Heuristic,
    VirusTotal,
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Which scanners run; with more than one, every verdict must be clean.
    pub variants: Vec<ScannerVariant>,
    /// Policy when a scanner is unavailable. Default is fail-closed: the
    /// upload is rejected rather than admitted unscanned.
    pub fail_open: bool,
    pub suspicious_patterns: Vec<String>,
    pub virustotal_api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_size_bytes: u64,
    /// Lowercase extensions with leading dot; empty means unrestricted.
    pub allowed_extensions: Vec<String>,
    /// Lowercase MIME types; empty means unrestricted.
    pub allowed_mime_types: Vec<String>,
}

/// All recognized options, built once from the environment in `main` and
/// handed to each component at construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub upload: UploadPolicy,
    pub storage: StorageConfig,
    pub scanner: ScannerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar("PORT", raw))?,
            Err(_) => 8080,
        };

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|raw| csv(&raw));

        let max_size_mb = match std::env::var("UPLOAD_MAX_SIZE_MB") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidVar("UPLOAD_MAX_SIZE_MB", raw))?,
            Err(_) => DEFAULT_MAX_SIZE_MB,
        };

        let upload = UploadPolicy {
            max_size_bytes: max_size_mb * 1024 * 1024,
            allowed_extensions: csv(&env_or_empty("UPLOAD_ALLOWED_EXTENSIONS"))
                .into_iter()
                .map(|ext| normalize_extension(&ext))
                .collect(),
            allowed_mime_types: csv(&env_or_empty("UPLOAD_ALLOWED_MIME_TYPES"))
                .into_iter()
                .map(|mime| mime.to_lowercase())
                .collect(),
        };

        let provider = match std::env::var("STORAGE_PROVIDER").as_deref() {
            Ok("s3") | Err(_) => StorageProvider::S3,
            Ok("memory") => StorageProvider::Memory,
            Ok(other) => {
                return Err(ConfigError::InvalidVar("STORAGE_PROVIDER", other.to_string()))
            }
        };

        let s3 = match provider {
            StorageProvider::S3 => Some(S3Config {
                bucket: require("S3_BUCKET")?,
                region: require("S3_REGION")?,
                endpoint: std::env::var("S3_ENDPOINT").ok(),
                access_key_id: require("S3_ACCESS_KEY_ID")?,
                secret_access_key: require("S3_SECRET_ACCESS_KEY")?,
            }),
            StorageProvider::Memory => None,
        };

        let variants = match std::env::var("SCANNER_VARIANTS") {
            Ok(raw) => {
                let mut variants = Vec::new();
                for name in csv(&raw) {
                    match name.as_str() {
                        "heuristic" => variants.push(ScannerVariant::Heuristic),
                        "virustotal" => variants.push(ScannerVariant::VirusTotal),
                        other => {
                            return Err(ConfigError::InvalidVar(
                                "SCANNER_VARIANTS",
                                other.to_string(),
                            ))
                        }
                    }
                }
                variants
            }
            Err(_) => vec![ScannerVariant::Heuristic],
        };

        let fail_open = match std::env::var("SCANNER_FAIL_OPEN").as_deref() {
            Ok("true") | Ok("1") => true,
            _ => false,
        };

        let suspicious_patterns = match std::env::var("SCANNER_SUSPICIOUS_PATTERNS") {
            Ok(raw) => csv(&raw).into_iter().map(|p| p.to_lowercase()).collect(),
            Err(_) => vec![DEFAULT_SUSPICIOUS_PATTERN.to_string()],
        };

        let scanner = ScannerConfig {
            variants,
            fail_open,
            suspicious_patterns,
            virustotal_api_key: std::env::var("VIRUSTOTAL_API_KEY").ok(),
        };

        Ok(AppConfig {
            port,
            database_url,
            cors_allowed_origins,
            upload,
            storage: StorageConfig { provider, s3 },
            scanner,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

/// Split a comma-separated value, trimming entries and dropping empty ones.
fn csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Lowercase an extension and ensure the leading dot (`PDF` and `.pdf` both
/// become `.pdf`), matching how extensions are extracted at validation time.
fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_trims_and_drops_empty_entries() {
        assert_eq!(csv(" .pdf, .PNG ,, "), vec![".pdf", ".PNG"]);
        assert!(csv("").is_empty());
    }

    #[test]
    fn extensions_are_normalized() {
        assert_eq!(normalize_extension("PDF"), ".pdf");
        assert_eq!(normalize_extension(".Pdf"), ".pdf");
    }
}
