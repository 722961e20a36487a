use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The single persistent entity: one row per admitted file.
///
/// Created exactly once after every admission check has passed and the bytes
/// are durably stored; never mutated afterwards. `access_token` is the sole
/// secret that authorizes retrieval; the storage key (`stored_name`) carries
/// no authorization of its own.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: Uuid,
    /// Client-supplied name; display only, never trusted for security decisions.
    pub original_file_name: String,
    /// Blob name, derived as `{id}{normalized_extension}`.
    pub stored_name: String,
    /// Lowercase MIME type, normalized at admission.
    pub content_type: String,
    pub size_bytes: u64,
    /// True only when a clean scanner verdict was obtained at admission;
    /// false for files admitted under the fail-open policy.
    pub is_safe: bool,
    pub access_token: String,
    pub uploaded_at: DateTime<Utc>,
}
