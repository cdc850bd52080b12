//! Filesystem Image Store
//!
//! Uploaded files live under `{root}/images/artworks/{artwork_id}/` with
//! a random file name; the database stores the forward-slash relative
//! path. URLs route through the API so access control stays server-side.

use kernel::id::ArtworkId;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Filesystem-backed image storage
#[derive(Debug, Clone)]
pub struct ImageStore {
    storage_root: PathBuf,
    base_url: String,
}

impl ImageStore {
    pub fn new(storage_root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            storage_root: storage_root.into(),
            base_url: base_url.into(),
        }
    }

    /// Store uploaded bytes and return the relative path to persist
    pub async fn save_image(
        &self,
        bytes: &[u8],
        artwork_id: ArtworkId,
        original_name: &str,
    ) -> std::io::Result<String> {
        let dir = self
            .storage_root
            .join("images")
            .join("artworks")
            .join(artwork_id.to_string());
        tokio::fs::create_dir_all(&dir).await?;

        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();
        let file_name = format!("{}{extension}", Uuid::new_v4());
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        let relative = format!("images/artworks/{artwork_id}/{file_name}");
        tracing::info!(path = %relative, "image saved");
        Ok(relative)
    }

    /// Resolve a stored relative path to a physical path, if the file exists
    pub async fn physical_path(&self, image_path: &str) -> Option<PathBuf> {
        let relative = Path::new(image_path.trim_start_matches('/'));
        // Stored paths are flat relative paths; anything else is rejected
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            tracing::warn!(path = %image_path, "rejected non-normal image path");
            return None;
        }

        let physical = self.storage_root.join(relative);
        match tokio::fs::try_exists(&physical).await {
            Ok(true) => Some(physical),
            _ => None,
        }
    }

    /// Whether a stored image is present on disk
    pub async fn exists(&self, image_path: &str) -> bool {
        self.physical_path(image_path).await.is_some()
    }

    /// Read a stored image back; missing or unreadable files are a miss
    pub async fn image_bytes(&self, image_path: &str) -> Option<Vec<u8>> {
        let physical = self.physical_path(image_path).await?;
        match tokio::fs::read(&physical).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(path = %image_path, error = %e, "failed to read image");
                None
            }
        }
    }

    /// Public URL for a stored image, or the placeholder when absent
    pub fn image_url(&self, image_path: Option<&str>) -> String {
        let Some(path) = image_path.filter(|p| !p.is_empty()) else {
            return self.placeholder_url();
        };

        let parts: Vec<&str> = path.split('/').collect();
        if let ["images", "artworks", artwork_id, file_name] = parts.as_slice() {
            return format!(
                "{}/api/artworks/image/{artwork_id}/{file_name}",
                self.base_url
            );
        }

        // Unrecognized layout: serve it as a static path
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn placeholder_url(&self) -> String {
        format!("{}/images/placeholder.jpg", self.base_url)
    }
}
