//! Download Artwork Use Case

use crate::domain::repository::ArtworkRepository;
use crate::error::{ArtworkError, ArtworkResult};
use kernel::id::{ArtworkId, UserId};
use std::sync::Arc;

/// What the handler needs to stream the original file back
#[derive(Debug, Clone)]
pub struct DownloadInfo {
    pub artwork_id: ArtworkId,
    pub file_name: String,
    pub content_type: String,
    pub image_path: Option<String>,
}

/// Download Artwork Use Case
///
/// Only the owner or a buyer may download the original file.
pub struct DownloadArtworkUseCase<R>
where
    R: ArtworkRepository,
{
    repo: Arc<R>,
}

impl<R> DownloadArtworkUseCase<R>
where
    R: ArtworkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        artwork_id: ArtworkId,
        requester: UserId,
    ) -> ArtworkResult<Option<DownloadInfo>> {
        if !artwork_id.is_valid() {
            return Err(ArtworkError::Validation("Invalid artwork ID".to_string()));
        }
        if !requester.is_valid() {
            return Err(ArtworkError::Validation("Invalid user ID".to_string()));
        }

        let Some(details) = self.repo.find_by_id(artwork_id).await? else {
            return Ok(None);
        };
        let artwork = details.artwork;

        if artwork.owner_id != requester && !self.repo.has_purchased(requester, artwork_id).await? {
            return Err(ArtworkError::Forbidden(
                "You do not have permission to download this artwork".to_string(),
            ));
        }

        Ok(Some(DownloadInfo {
            artwork_id,
            file_name: artwork.file_name,
            content_type: artwork.content_type,
            image_path: artwork.image_path,
        }))
    }
}
