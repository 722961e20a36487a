use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::{
    application::{
        error::ApplicationError,
        services::storage_service::{ByteRange, ContentStream, StorageService},
    },
    domain::{config::S3Config, models::spool::FileSpool},
    services::error::StorageError,
};

/// Cloud blob backend over any S3-compatible store.
pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    pub fn new(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "filegate",
        );

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }

    /// Create the bucket when it does not exist yet.
    pub async fn ensure_bucket(&self) -> Result<(), StorageError> {
        match self.client.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_bucket_already_owned_by_you()
                    || service_err.is_bucket_already_exists()
                {
                    Ok(())
                } else {
                    Err(StorageError::Provider(service_err.to_string()))
                }
            }
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn put(
        &self,
        name: &str,
        content_type: &str,
        source: &FileSpool,
    ) -> Result<(), ApplicationError> {
        let body = ByteStream::from_path(source.path())
            .await
            .map_err(|err| StorageError::Provider(err.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|err| StorageError::Provider(err.into_service_error().to_string()))?;

        debug!(bucket = %self.bucket, key = %name, size_bytes = source.size(), "object stored");
        Ok(())
    }

    async fn get(
        &self,
        name: &str,
        range: Option<ByteRange>,
    ) -> Result<ContentStream, ApplicationError> {
        let mut request = self.client.get_object().bucket(&self.bucket).key(name);

        if let Some(range) = range {
            let header = match range.end {
                Some(end) => format!("bytes={}-{}", range.start, end),
                None => format!("bytes={}-", range.start),
            };
            request = request.range(header);
        }

        let output = request.send().await.map_err(|err| {
            let service_err = err.into_service_error();
            if service_err.is_no_such_key() {
                StorageError::NotFound(name.to_string())
            } else {
                StorageError::Provider(service_err.to_string())
            }
        })?;

        Ok(Box::pin(ReaderStream::new(output.body.into_async_read())))
    }

    async fn delete(&self, name: &str) -> Result<(), ApplicationError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
            .map_err(|err| StorageError::Provider(err.into_service_error().to_string()))?;
        Ok(())
    }
}
