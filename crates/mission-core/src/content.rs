//! Size limits for stored markdown bodies (skills and documents).

use crate::CoreError;

/// Default ceiling for a stored markdown body, in UTF-8 bytes.
pub const MAX_CONTENT_MARKDOWN_BYTES: usize = 256 * 1024;

/// Reject `text` when its UTF-8 byte length is over `max_bytes`.
///
/// Absent or empty text is always accepted. `key` identifies the record
/// (usually a slug) in the error.
pub fn validate_content_size(
    text: Option<&str>,
    key: Option<&str>,
    max_bytes: usize,
) -> Result<(), CoreError> {
    let Some(text) = text else {
        return Ok(());
    };

    // str::len is the encoded byte length.
    let actual = text.len();
    if actual > max_bytes {
        return Err(CoreError::ContentTooLarge {
            key: key.map(str::to_string),
            limit: max_bytes,
            actual,
        });
    }

    Ok(())
}

/// [`validate_content_size`] against [`MAX_CONTENT_MARKDOWN_BYTES`].
pub fn validate_content_markdown(text: Option<&str>, key: Option<&str>) -> Result<(), CoreError> {
    validate_content_size(text, key, MAX_CONTENT_MARKDOWN_BYTES)
}
