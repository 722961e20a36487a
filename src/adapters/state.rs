use std::sync::Arc;

use crate::{
    application::{
        repositories::FileRecordRepository,
        services::{DownloadService, UploadService},
    },
    domain::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub file_records: Arc<dyn FileRecordRepository>,
    pub upload_service: Arc<UploadService>,
    pub download_service: Arc<DownloadService>,
}
