//! Key generation for published objects.

use uuid::Uuid;

/// Map an upload content type to the file extension used in storage keys.
///
/// Unknown video subtypes fall back to the subtype itself so S3-compatible
/// consoles still show something sensible.
pub fn extension_for_content_type(content_type: &str) -> String {
    match content_type {
        "video/mp4" => "mp4".to_string(),
        "video/quicktime" => "mov".to_string(),
        "video/webm" => "webm".to_string(),
        other => {
            let subtype = other.split('/').nth(1).unwrap_or("bin");
            let cleaned: String = subtype
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            if cleaned.is_empty() {
                "bin".to_string()
            } else {
                cleaned
            }
        }
    }
}

/// Generate a storage key of the form `{prefix}/{uuid}.{ext}`.
///
/// `prefix` is the orientation segment ("landscape", "portrait" or "other");
/// the UUID makes the key collision-free without coordination.
pub fn publish_key(prefix: &str, content_type: &str) -> String {
    format!(
        "{}/{}.{}",
        prefix,
        Uuid::new_v4(),
        extension_for_content_type(content_type)
    )
}
