use axum::{extract::State, Json};
use serde::Serialize;
use sysinfo::System;

use crate::adapters::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub config: HealthConfigInfo,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct HealthConfigInfo {
    #[serde(rename = "maxSizeBytes")]
    pub max_size_bytes: u64,
    #[serde(rename = "allowedExtensions")]
    pub allowed_extensions: Vec<String>,
    #[serde(rename = "allowedMimeTypes")]
    pub allowed_mime_types: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/v1/health
    pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let metrics = SystemMetrics {
            cpu_usage_percent: sys.global_cpu_usage(),
            memory_used_bytes: sys.used_memory(),
            memory_total_bytes: sys.total_memory(),
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            provider: state.config.storage.provider.as_str().to_string(),
            config: HealthConfigInfo {
                max_size_bytes: state.config.upload.max_size_bytes,
                allowed_extensions: state.config.upload.allowed_extensions.clone(),
                allowed_mime_types: state.config.upload.allowed_mime_types.clone(),
            },
            metrics,
        })
    }
}
