//! Filename extraction from the last `/`-separated segment.

/// Derives a filename from a URL-like string.
///
/// Trims the input, splits on `/` and takes the last segment with any query
/// string (`?...`) removed. Returns `None` for blank input or input without a
/// `/`. A trailing slash yields `Some("")`; callers check emptiness themselves.
pub fn extract_filename(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (_, last) = trimmed.rsplit_once('/')?;
    let without_query = match last.find('?') {
        Some(idx) => &last[..idx],
        None => last,
    };
    Some(without_query.trim().to_string())
}
