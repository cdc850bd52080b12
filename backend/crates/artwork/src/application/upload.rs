//! Upload Artwork Use Case

use crate::application::config::cache_keys;
use crate::domain::entities::{Artwork, ArtworkDetails, LedgerRecord};
use crate::domain::ledger::Ledger;
use crate::domain::repository::ArtworkRepository;
use crate::domain::services::perceptual_hash_placeholder;
use crate::domain::value_objects::ContentHash;
use crate::error::{ArtworkError, ArtworkResult};
use crate::infra::images::ImageStore;
use kernel::id::UserId;
use platform::cache::MemoryCache;
use std::sync::Arc;

/// Input for an artwork upload
#[derive(Debug)]
pub struct UploadInput {
    pub owner_id: UserId,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Whether to anchor the content hash on the ledger
    pub use_ledger: bool,
}

/// Output of an artwork upload
#[derive(Debug)]
pub struct UploadOutput {
    pub details: ArtworkDetails,
    /// Transaction id of the anchoring performed during this upload, if any
    pub transaction_id: Option<String>,
}

/// Upload Artwork Use Case
///
/// Registration is all-or-nothing only for the relational record itself:
/// image storage and ledger anchoring are best-effort and never fail an
/// upload that already has its row.
pub struct UploadArtworkUseCase<R, L>
where
    R: ArtworkRepository,
    L: Ledger,
{
    repo: Arc<R>,
    ledger: Arc<L>,
    images: Arc<ImageStore>,
    cache: Arc<MemoryCache>,
}

impl<R, L> UploadArtworkUseCase<R, L>
where
    R: ArtworkRepository,
    L: Ledger,
{
    pub fn new(
        repo: Arc<R>,
        ledger: Arc<L>,
        images: Arc<ImageStore>,
        cache: Arc<MemoryCache>,
    ) -> Self {
        Self {
            repo,
            ledger,
            images,
            cache,
        }
    }

    pub async fn execute(&self, input: UploadInput) -> ArtworkResult<UploadOutput> {
        if input.bytes.is_empty() {
            return Err(ArtworkError::Validation("No file uploaded".to_string()));
        }
        if !input.owner_id.is_valid() {
            return Err(ArtworkError::Validation("Invalid user ID".to_string()));
        }

        let content_hash = ContentHash::compute(&input.bytes);
        tracing::info!(
            owner_id = %input.owner_id,
            content_hash = %content_hash,
            file_name = %input.file_name,
            "starting artwork upload"
        );

        if self.repo.find_by_content_hash(&content_hash).await?.is_some() {
            return Err(ArtworkError::DuplicateArtwork);
        }

        let file_size = input.bytes.len() as i64;
        let perceptual =
            perceptual_hash_placeholder(&input.file_name, file_size, &input.content_type);
        let mut artwork = Artwork::new(
            input.owner_id,
            input.file_name,
            input.content_type,
            file_size,
            content_hash.clone(),
            Some(perceptual),
        );

        // Insert first to obtain the id; a concurrent duplicate surfaces
        // here as DuplicateArtwork via the unique index.
        let artwork_id = self.repo.insert_artwork(&artwork).await?;
        artwork.id = artwork_id;
        tracing::info!(artwork_id = %artwork_id, "artwork registered");

        // Best-effort image storage; the registration stands without it
        match self
            .images
            .save_image(&input.bytes, artwork_id, &artwork.file_name)
            .await
        {
            Ok(path) => {
                artwork.image_path = Some(path);
                if let Err(e) = self.repo.update_artwork(&artwork).await {
                    tracing::error!(artwork_id = %artwork_id, error = %e, "failed to persist image path");
                }
            }
            Err(e) => {
                tracing::error!(artwork_id = %artwork_id, error = %e, "failed to save image");
            }
        }

        // Best-effort ledger anchoring
        let mut transaction_id = None;
        if input.use_ledger {
            let result = self
                .ledger
                .register_hash(content_hash.as_str(), &artwork.file_name)
                .await;
            match result.transaction_id.filter(|_| result.success) {
                Some(tx) => {
                    transaction_id = Some(tx.clone());
                    let record = LedgerRecord::confirmed(
                        artwork_id,
                        tx,
                        format!("Artwork registration: {}", artwork.file_name),
                    );
                    if let Err(e) = self.repo.add_ledger_record(&record).await {
                        tracing::error!(artwork_id = %artwork_id, error = %e, "failed to persist ledger record");
                    }
                }
                None => {
                    tracing::warn!(
                        artwork_id = %artwork_id,
                        error = result.error.as_deref().unwrap_or("unknown"),
                        "ledger registration failed"
                    );
                }
            }
        }

        self.cache.remove(&cache_keys::user_artworks(input.owner_id));
        self.cache.remove(cache_keys::MARKETPLACE);
        self.cache.remove(&cache_keys::seller_stats(input.owner_id));

        let details = self
            .repo
            .find_by_id(artwork_id)
            .await?
            .ok_or_else(|| ArtworkError::Internal("uploaded artwork vanished".to_string()))?;

        tracing::info!(artwork_id = %artwork_id, owner_id = %input.owner_id, "artwork upload completed");
        Ok(UploadOutput {
            details,
            transaction_id,
        })
    }
}
