pub mod download_service;
pub mod scanner_service;
pub mod storage_service;
pub mod token_service;
pub mod upload_service;
pub mod validation;

pub use download_service::{DownloadContent, DownloadService};
pub use scanner_service::{ScanError, ScannerService, Verdict};
pub use storage_service::{ByteRange, ContentStream, StorageService};
pub use token_service::TokenService;
pub use upload_service::UploadService;
pub use validation::UploadValidator;
