use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    adapters::{dto::file_dto::FileResponse, range::parse_range_header, state::AppState},
    application::error::ApplicationError,
    domain::models::{spool::SpoolWriter, upload::IncomingFile},
};

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub token: Option<String>,
}

pub struct FileController;

impl FileController {
    /// GET /api/v1/files
    pub async fn list_files(
        State(state): State<AppState>,
    ) -> Result<Json<Vec<FileResponse>>, ApplicationError> {
        let records = state.file_records.list_all().await?;
        Ok(Json(records.into_iter().map(FileResponse::from).collect()))
    }

    /// POST /api/v1/files
    pub async fn upload_file(
        State(state): State<AppState>,
        multipart: Multipart,
    ) -> Result<(StatusCode, Json<FileResponse>), ApplicationError> {
        let file = Self::extract_file(multipart).await?;
        info!(
            file_name = %file.file_name,
            declared_type = %file.content_type,
            size_bytes = file.size(),
            "upload received"
        );

        let record = state.upload_service.upload(file).await?;
        Ok((StatusCode::CREATED, Json(FileResponse::from(record))))
    }

    /// GET /api/v1/files/{file_id}/content?token=...
    pub async fn download_file(
        State(state): State<AppState>,
        Path(file_id): Path<Uuid>,
        Query(query): Query<DownloadQuery>,
        headers: HeaderMap,
    ) -> Result<Response, ApplicationError> {
        let token = query.token.unwrap_or_default();
        let requested = headers
            .get(header::RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_range_header);

        let content = state
            .download_service
            .retrieve(file_id, &token, requested)
            .await?;
        let record = content.record;

        let builder = Response::builder()
            .header(header::CONTENT_TYPE, record.content_type.clone())
            .header(header::ACCEPT_RANGES, "bytes")
            .header(
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    record.original_file_name.replace('"', "")
                ),
            );

        let response = match content.range {
            Some((start, end)) => builder
                .status(StatusCode::PARTIAL_CONTENT)
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, record.size_bytes),
                )
                .header(header::CONTENT_LENGTH, end - start + 1)
                .body(Body::from_stream(content.stream)),
            None => builder
                .status(StatusCode::OK)
                .header(header::CONTENT_LENGTH, record.size_bytes)
                .body(Body::from_stream(content.stream)),
        }
        .map_err(|e| ApplicationError::InternalError(format!("failed to build response: {}", e)))?;

        Ok(response)
    }

    /// Exactly one field named `file` is accepted; other fields are ignored.
    async fn extract_file(mut multipart: Multipart) -> Result<IncomingFile, ApplicationError> {
        let mut file: Option<IncomingFile> = None;

        while let Some(mut field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            if field.name() != Some("file") {
                continue;
            }

            if file.is_some() {
                return Err(ApplicationError::BadRequest(
                    "Exactly one 'file' field is expected".to_string(),
                ));
            }

            let file_name = field.file_name().unwrap_or("unknown").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();

            // Spool the body to disk chunk by chunk; the request is never
            // held in memory whole.
            let mut writer = SpoolWriter::create().await.map_err(|e| {
                error!("Cannot create upload spool: {}", e);
                ApplicationError::InternalError("Failed to receive upload".to_string())
            })?;

            while let Some(chunk) = field.chunk().await.map_err(|e| {
                warn!("Cannot read file bytes: {}", e);
                ApplicationError::BadRequest("Invalid file data".to_string())
            })? {
                writer.write_chunk(&chunk).await.map_err(|e| {
                    error!("Cannot write upload spool: {}", e);
                    ApplicationError::InternalError("Failed to receive upload".to_string())
                })?;
            }

            let spool = writer.finish().await.map_err(|e| {
                error!("Cannot finish upload spool: {}", e);
                ApplicationError::InternalError("Failed to receive upload".to_string())
            })?;

            file = Some(IncomingFile::new(spool, file_name, content_type));
        }

        file.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("Missing required 'file' field".to_string())
        })
    }
}
