use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("storage provider error: {0}")]
    Provider(String),

    #[error("invalid storage configuration: {0}")]
    InvalidConfig(String),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(_) => ApplicationError::NotFound,
            StorageError::Network(msg)
            | StorageError::Provider(msg)
            | StorageError::InvalidConfig(msg) => ApplicationError::StorageFailure(msg),
        }
    }
}
