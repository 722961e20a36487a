use std::{
    io,
    path::{Path, PathBuf},
};

use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

/// Upload payload spooled to a temporary file, so request bodies are never
/// held in memory whole. The backing file is removed when the spool drops.
#[derive(Debug)]
pub struct FileSpool {
    path: PathBuf,
    size: u64,
}

impl FileSpool {
    /// Spool a complete payload in one write. Request handling streams
    /// chunk by chunk through [`SpoolWriter`] instead.
    pub async fn from_bytes(content: &[u8]) -> io::Result<Self> {
        let mut writer = SpoolWriter::create().await?;
        writer.write_chunk(content).await?;
        writer.finish().await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("filegate-{}", Uuid::new_v4()))
    }
}

impl Drop for FileSpool {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Incremental writer for an in-flight upload. Dropping the writer without
/// calling [`SpoolWriter::finish`] removes the partial file.
pub struct SpoolWriter {
    file: Option<fs::File>,
    path: PathBuf,
    size: u64,
}

impl SpoolWriter {
    pub async fn create() -> io::Result<Self> {
        let path = FileSpool::temp_path();
        let file = fs::File::create(&path).await?;
        Ok(Self {
            file: Some(file),
            path,
            size: 0,
        })
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(chunk).await?;
            self.size += chunk.len() as u64;
        }
        Ok(())
    }

    pub async fn finish(mut self) -> io::Result<FileSpool> {
        if let Some(mut file) = self.file.take() {
            if let Err(err) = file.flush().await {
                let _ = std::fs::remove_file(&self.path);
                return Err(err);
            }
        }
        Ok(FileSpool {
            path: self.path.clone(),
            size: self.size,
        })
    }
}

impl Drop for SpoolWriter {
    fn drop(&mut self) {
        if self.file.take().is_some() {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn chunked_writes_accumulate() {
        let mut writer = SpoolWriter::create().await.unwrap();
        writer.write_chunk(b"hello ").await.unwrap();
        writer.write_chunk(b"world").await.unwrap();
        let spool = writer.finish().await.unwrap();

        assert_eq!(spool.size(), 11);
        assert_eq!(fs::read(spool.path()).await.unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn dropping_the_spool_removes_the_backing_file() {
        let spool = FileSpool::from_bytes(b"abc").await.unwrap();
        let path = spool.path().to_path_buf();
        assert!(path.exists());
        drop(spool);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn abandoned_writer_leaves_no_partial_file() {
        let mut writer = SpoolWriter::create().await.unwrap();
        writer.write_chunk(b"partial").await.unwrap();
        let path = writer.path.clone();
        assert!(path.exists());
        drop(writer);
        assert!(!path.exists());
    }
}
