//! Seller Statistics Use Case

use crate::application::config::{ArtworkConfig, cache_keys};
use crate::domain::repository::ArtworkRepository;
use crate::error::{ArtworkError, ArtworkResult};
use kernel::id::UserId;
use platform::cache::MemoryCache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Aggregate sales figures for a seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerStats {
    pub total_sales: i64,
    pub total_revenue: f64,
    pub listed_artworks: i64,
}

/// Seller Statistics Use Case (read-through cached)
pub struct SellerStatsUseCase<R>
where
    R: ArtworkRepository,
{
    repo: Arc<R>,
    cache: Arc<MemoryCache>,
    config: Arc<ArtworkConfig>,
}

impl<R> SellerStatsUseCase<R>
where
    R: ArtworkRepository,
{
    pub fn new(repo: Arc<R>, cache: Arc<MemoryCache>, config: Arc<ArtworkConfig>) -> Self {
        Self {
            repo,
            cache,
            config,
        }
    }

    pub async fn execute(&self, seller_id: UserId) -> ArtworkResult<SellerStats> {
        if !seller_id.is_valid() {
            return Err(ArtworkError::Validation("Invalid user ID".to_string()));
        }

        let cache_key = cache_keys::seller_stats(seller_id);
        if let Some(stats) = self.cache.get_json::<SellerStats>(&cache_key) {
            return Ok(stats);
        }

        let purchases = self.repo.list_purchases_for_seller(seller_id).await?;
        let artworks = self.repo.list_by_owner(seller_id).await?;

        let stats = SellerStats {
            total_sales: purchases.len() as i64,
            total_revenue: purchases.iter().map(|p| p.purchase_price).sum(),
            listed_artworks: artworks
                .iter()
                .filter(|d| d.artwork.is_purchasable())
                .count() as i64,
        };

        self.cache
            .set_json(&cache_key, &stats, self.config.seller_stats_ttl);
        Ok(stats)
    }
}
