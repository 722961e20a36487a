use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::{ApplicationError, ValidationError};

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::Validation(kind) => {
                warn!("Upload rejected: {:?}", kind);
                let status = match kind {
                    ValidationError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, kind.message().to_string())
            }
            ApplicationError::Unsafe(ref reason) => {
                warn!("Upload rejected by scanner: {}", reason);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "File was rejected by the malware scan".to_string(),
                )
            }
            ApplicationError::ScannerUnavailable(ref msg) => {
                error!("Scanner unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Malware scanning is temporarily unavailable".to_string(),
                )
            }
            ApplicationError::NotFound => {
                warn!("Resource not found");
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            ApplicationError::Unauthorized => {
                warn!("Unauthorized access attempt");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApplicationError::RangeNotSatisfiable => {
                warn!("Requested range not satisfiable");
                (
                    StatusCode::RANGE_NOT_SATISFIABLE,
                    "Requested range not satisfiable".to_string(),
                )
            }
            ApplicationError::BadRequest(ref msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApplicationError::StorageFailure(ref msg) => {
                error!("Storage failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApplicationError::DatabaseError(ref msg) => {
                error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
