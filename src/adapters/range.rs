use crate::application::services::storage_service::ByteRange;

/// Parse a single-range `Range` header value: `bytes=a-b` or `bytes=a-`.
/// Multi-range and suffix (`bytes=-n`) forms are not supported; `None` means
/// the caller serves the full body.
pub fn parse_range_header(value: &str) -> Option<ByteRange> {
    let spec = value.strip_prefix("bytes=")?.trim();
    if spec.contains(',') {
        return None;
    }

    let (start, end) = spec.split_once('-')?;
    let start: u64 = start.trim().parse().ok()?;
    let end = end.trim();

    if end.is_empty() {
        return Some(ByteRange { start, end: None });
    }

    let end: u64 = end.parse().ok()?;
    if end < start {
        return None;
    }
    Some(ByteRange {
        start,
        end: Some(end),
    })
}
