//! Verify Artwork Use Case
//!
//! Resolution order: explicit content hash, then ledger transaction id,
//! then the hash of an uploaded file. An unknown artwork is a normal
//! negative result, not an error.

use crate::domain::entities::ArtworkDetails;
use crate::domain::repository::ArtworkRepository;
use crate::domain::value_objects::ContentHash;
use crate::error::{ArtworkError, ArtworkResult};
use std::sync::Arc;

/// Input for artwork verification; at least one field must be present
#[derive(Debug, Default)]
pub struct VerifyInput {
    pub file_hash: Option<String>,
    pub transaction_id: Option<String>,
    pub file_bytes: Option<Vec<u8>>,
}

impl VerifyInput {
    pub fn is_empty(&self) -> bool {
        self.file_hash.as_deref().is_none_or(str::is_empty)
            && self.transaction_id.as_deref().is_none_or(str::is_empty)
            && self.file_bytes.as_deref().is_none_or(<[u8]>::is_empty)
    }
}

/// Outcome of a verification
#[derive(Debug)]
pub struct VerifyOutput {
    pub is_verified: bool,
    pub message: String,
    pub details: Option<ArtworkDetails>,
}

/// Verify Artwork Use Case
pub struct VerifyArtworkUseCase<R>
where
    R: ArtworkRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyArtworkUseCase<R>
where
    R: ArtworkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: VerifyInput) -> ArtworkResult<VerifyOutput> {
        if input.is_empty() {
            return Err(ArtworkError::Validation(
                "Provide a file, a file hash, or a transaction ID".to_string(),
            ));
        }

        let details = if let Some(hash) = input.file_hash.as_deref().filter(|h| !h.is_empty()) {
            match ContentHash::parse(hash) {
                Some(hash) => self.repo.find_by_content_hash(&hash).await?,
                // A malformed hash can never match a stored artwork
                None => None,
            }
        } else if let Some(tx) = input.transaction_id.as_deref().filter(|t| !t.is_empty()) {
            self.repo.find_by_transaction_id(tx).await?
        } else if let Some(bytes) = input.file_bytes.as_deref() {
            let hash = ContentHash::compute(bytes);
            self.repo.find_by_content_hash(&hash).await?
        } else {
            None
        };

        Ok(match details {
            Some(details) => {
                tracing::info!(artwork_id = %details.artwork.id, "artwork verified");
                VerifyOutput {
                    is_verified: true,
                    message: "Artwork verified successfully".to_string(),
                    details: Some(details),
                }
            }
            None => VerifyOutput {
                is_verified: false,
                message: "Artwork not found in the system".to_string(),
                details: None,
            },
        })
    }
}
