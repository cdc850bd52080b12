//! List For Sale Use Case

use crate::application::config::cache_keys;
use crate::domain::entities::ArtworkDetails;
use crate::domain::repository::ArtworkRepository;
use crate::error::{ArtworkError, ArtworkResult};
use kernel::id::{ArtworkId, UserId};
use platform::cache::MemoryCache;
use std::sync::Arc;

/// List For Sale Use Case
///
/// Only the owner may list; the listing flag and the price are set
/// together so a listed artwork always has a positive price.
pub struct ListForSaleUseCase<R>
where
    R: ArtworkRepository,
{
    repo: Arc<R>,
    cache: Arc<MemoryCache>,
}

impl<R> ListForSaleUseCase<R>
where
    R: ArtworkRepository,
{
    pub fn new(repo: Arc<R>, cache: Arc<MemoryCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(
        &self,
        artwork_id: ArtworkId,
        price: f64,
        caller: UserId,
    ) -> ArtworkResult<ArtworkDetails> {
        if !artwork_id.is_valid() {
            return Err(ArtworkError::Validation("Invalid artwork ID".to_string()));
        }
        if !caller.is_valid() {
            return Err(ArtworkError::Validation("Invalid user ID".to_string()));
        }
        if !(price > 0.0 && price.is_finite()) {
            return Err(ArtworkError::Validation(
                "Sale price must be a positive amount".to_string(),
            ));
        }

        let mut details = self
            .repo
            .find_by_id(artwork_id)
            .await?
            .ok_or(ArtworkError::NotFound)?;

        if details.artwork.owner_id != caller {
            return Err(ArtworkError::Forbidden(
                "You can only list your own artworks for sale".to_string(),
            ));
        }

        details.artwork.list_for_sale(price);
        self.repo.update_artwork(&details.artwork).await?;

        self.cache.remove(&cache_keys::user_artworks(caller));
        self.cache.remove(cache_keys::MARKETPLACE);
        self.cache.remove(&cache_keys::seller_stats(caller));

        tracing::info!(
            artwork_id = %artwork_id,
            owner_id = %caller,
            price,
            "artwork listed for sale"
        );
        Ok(details)
    }
}
