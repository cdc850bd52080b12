//! Domain Services
//!
//! Pure functions over uploaded files: content hashing, the perceptual
//! hash placeholder, and content-type / file-name helpers.

use chrono::Utc;
use sha1::{Digest, Sha1};

/// Maximum accepted upload size (50 MB, matching the HTTP body limit)
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Placeholder perceptual hash until a real pHash implementation lands.
///
/// Derived from upload metadata (not pixel data), so it is NOT robust to
/// re-encoding; it only gives near-duplicate tooling a stable column to
/// read. The `phash_` prefix marks the format.
pub fn perceptual_hash_placeholder(file_name: &str, file_size: i64, content_type: &str) -> String {
    let ticks = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seed = format!("{file_name}_{file_size}_{content_type}_{ticks}");
    let digest = Sha1::digest(seed.as_bytes());
    format!("phash_{}", hex::encode(digest))
}

/// Guess a content type from a file extension, for serving stored images
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perceptual_placeholder_is_prefixed_sha1_hex() {
        let hash = perceptual_hash_placeholder("sunset.png", 2048, "image/png");
        assert!(hash.starts_with("phash_"));
        // sha1 hex is 40 chars
        assert_eq!(hash.len(), "phash_".len() + 40);
        assert!(
            hash["phash_".len()..]
                .chars()
                .all(|c| c.is_ascii_hexdigit())
        );
    }

    #[test]
    fn content_type_matches_extension() {
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("archive.tar.gz"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
