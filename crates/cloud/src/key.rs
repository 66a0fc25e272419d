//! Object key and public URL construction.

use crate::StorageError;

/// Build a unique object key `{category}/{uuid}.{extension}`.
///
/// The category must be a single non-empty path segment.
pub fn object_key(category: &str, extension: &str) -> Result<String, StorageError> {
    let valid_category = !category.is_empty()
        && category
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_category {
        return Err(StorageError::InvalidKey(format!(
            "category '{category}' must be a single alphanumeric path segment"
        )));
    }
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(StorageError::InvalidKey(format!(
            "extension '{extension}' must be alphanumeric"
        )));
    }
    Ok(format!("{category}/{}.{extension}", uuid::Uuid::new_v4()))
}

/// Join a public base URL and an object key with exactly one slash.
pub fn public_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key.trim_start_matches('/'))
}
