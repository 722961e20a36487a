use crate::domain::models::spool::FileSpool;

/// A file as received from the client, before any admission decision. The
/// content lives in a temp-file spool, not in request memory.
#[derive(Debug)]
pub struct IncomingFile {
    pub spool: FileSpool,
    pub file_name: String,
    /// Declared content type, as sent by the client.
    pub content_type: String,
}

impl IncomingFile {
    pub fn new(spool: FileSpool, file_name: String, content_type: String) -> Self {
        Self {
            spool,
            file_name,
            content_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.spool.size()
    }

    /// Lowercase extension including the leading dot, empty when absent.
    pub fn normalized_extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default()
    }

    /// Declared MIME type lowercased with any parameters stripped
    /// (`image/JPEG; charset=utf-8` becomes `image/jpeg`).
    pub fn normalized_content_type(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or(&self.content_type)
            .trim()
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn file(name: &str, mime: &str) -> IncomingFile {
        let spool = FileSpool::from_bytes(b"data").await.unwrap();
        IncomingFile::new(spool, name.to_string(), mime.to_string())
    }

    #[tokio::test]
    async fn extension_is_lowercased_with_leading_dot() {
        assert_eq!(
            file("Report.PDF", "application/pdf").await.normalized_extension(),
            ".pdf"
        );
        assert_eq!(
            file("archive.tar.gz", "application/gzip").await.normalized_extension(),
            ".gz"
        );
    }

    #[tokio::test]
    async fn missing_extension_yields_empty_string() {
        assert_eq!(file("README", "text/plain").await.normalized_extension(), "");
    }

    #[tokio::test]
    async fn content_type_is_normalized() {
        assert_eq!(
            file("a.jpg", "image/JPEG; charset=utf-8")
                .await
                .normalized_content_type(),
            "image/jpeg"
        );
        assert_eq!(
            file("a.jpg", "image/png").await.normalized_content_type(),
            "image/png"
        );
    }
}
