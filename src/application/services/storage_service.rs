use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::{application::error::ApplicationError, domain::models::spool::FileSpool};

/// Requested byte range; `end` is inclusive, `None` means "to the end".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: Option<u64>,
}

impl ByteRange {
    /// Resolve against an object of `total` bytes into concrete inclusive
    /// bounds, or `None` when the range is unsatisfiable.
    pub fn resolve(&self, total: u64) -> Option<(u64, u64)> {
        if total == 0 || self.start >= total {
            return None;
        }
        let end = self.end.unwrap_or(total - 1).min(total - 1);
        if end < self.start {
            return None;
        }
        Some((self.start, end))
    }
}

/// Chunked object content, as served to the response body.
pub type ContentStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Blob store keyed by opaque object name. The name carries no authorization;
/// all access control lives in the download gate's token check.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Store the spooled content under `name`, replacing any existing
    /// object. Implementations read from the spool file, never from a
    /// whole-body buffer.
    async fn put(
        &self,
        name: &str,
        content_type: &str,
        source: &FileSpool,
    ) -> Result<(), ApplicationError>;

    /// Stream the object's bytes, optionally restricted to `range`.
    async fn get(
        &self,
        name: &str,
        range: Option<ByteRange>,
    ) -> Result<ContentStream, ApplicationError>;

    /// Remove the object. Only used for best-effort cleanup after a
    /// persistence failure.
    async fn delete(&self, name: &str) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_clamps_end_to_object_size() {
        let range = ByteRange { start: 10, end: Some(10_000) };
        assert_eq!(range.resolve(100), Some((10, 99)));
    }

    #[test]
    fn resolve_open_ended_range() {
        let range = ByteRange { start: 10, end: None };
        assert_eq!(range.resolve(100), Some((10, 99)));
    }

    #[test]
    fn resolve_rejects_start_past_end_of_object() {
        let range = ByteRange { start: 100, end: None };
        assert_eq!(range.resolve(100), None);
        assert_eq!(range.resolve(0), None);
    }
}
