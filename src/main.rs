use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use filegate::{
    adapters::{
        controllers::{file_controller::FileController, health_controller::HealthController},
        repositories::PgFileRecordRepository,
        state::AppState,
    },
    application::{
        repositories::FileRecordRepository,
        services::{DownloadService, TokenService, UploadService},
    },
    domain::config::AppConfig,
    services,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Initialize the rustls crypto provider before any AWS SDK operation.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let config = AppConfig::from_env().expect("ERROR: invalid configuration");
    tracing::info!(
        port = config.port,
        provider = config.storage.provider.as_str(),
        "Starting filegate"
    );

    let cors = if let Some(ref allowed_origins) = config.cors_allowed_origins {
        let origins: Vec<_> = allowed_origins
            .iter()
            .map(|origin| origin.parse().expect("Invalid CORS origin"))
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow all origins if not specified (only for development)
        CorsLayer::permissive()
    };

    tracing::info!("Connecting to database...");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await
        .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("ERROR: Failed to run database migrations");
    tracing::info!("Database ready");

    let storage = services::create_storage_service(&config.storage)
        .await
        .expect("Failed to create storage service");
    let scanner =
        services::create_scanner_service(&config.scanner).expect("Failed to create scanner");
    let file_records =
        Arc::new(PgFileRecordRepository::new(pool)) as Arc<dyn FileRecordRepository>;
    let tokens = TokenService::new();

    let upload_service = Arc::new(UploadService::new(
        config.upload.clone(),
        scanner,
        storage.clone(),
        file_records.clone(),
        tokens.clone(),
        config.scanner.fail_open,
    ));
    let download_service = Arc::new(DownloadService::new(
        file_records.clone(),
        storage,
        tokens,
    ));

    let port = config.port;
    // Transport-level cap on request bodies, applied before the pipeline
    // runs; leaves headroom for multipart framing.
    let body_limit = config.upload.max_size_bytes as usize + 1024 * 1024;

    let app_state = AppState {
        config: Arc::new(config),
        file_records,
        upload_service,
        download_service,
    };

    let router = Router::new()
        .route("/api/v1/health", get(HealthController::health_check))
        .route(
            "/api/v1/files",
            get(FileController::list_files).post(FileController::upload_file),
        )
        .route(
            "/api/v1/files/{file_id}/content",
            get(FileController::download_file),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
