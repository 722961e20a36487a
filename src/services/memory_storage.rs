use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    application::{
        error::ApplicationError,
        services::storage_service::{ByteRange, ContentStream, StorageService},
    },
    domain::models::spool::FileSpool,
    services::error::StorageError,
};

/// In-memory blob store for tests and local development.
#[derive(Clone, Default)]
pub struct MemoryStorageService {
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryStorageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.read().unwrap().contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().unwrap().is_empty()
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().unwrap().len()
    }
}

#[async_trait]
impl StorageService for MemoryStorageService {
    async fn put(
        &self,
        name: &str,
        _content_type: &str,
        source: &FileSpool,
    ) -> Result<(), ApplicationError> {
        let data = tokio::fs::read(source.path())
            .await
            .map_err(|e| StorageError::Provider(e.to_string()))?;
        self.objects
            .write()
            .unwrap()
            .insert(name.to_string(), Bytes::from(data));
        Ok(())
    }

    async fn get(
        &self,
        name: &str,
        range: Option<ByteRange>,
    ) -> Result<ContentStream, ApplicationError> {
        let data = self
            .objects
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;

        let chunk = match range {
            Some(range) => {
                let (start, end) = range
                    .resolve(data.len() as u64)
                    .ok_or_else(|| StorageError::Provider("range out of bounds".to_string()))?;
                data.slice(start as usize..=end as usize)
            }
            None => data,
        };

        Ok(Box::pin(futures::stream::iter(vec![Ok(chunk)])))
    }

    async fn delete(&self, name: &str) -> Result<(), ApplicationError> {
        self.objects
            .write()
            .unwrap()
            .remove(name)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        Ok(())
    }
}
