//! Purchase Artwork Use Case

use crate::application::config::{ArtworkConfig, cache_keys};
use crate::domain::entities::{ArtworkDetails, PurchaseRecord};
use crate::domain::ledger::Ledger;
use crate::domain::repository::ArtworkRepository;
use crate::domain::value_objects::LedgerAccount;
use crate::error::{ArtworkError, ArtworkResult};
use kernel::id::{ArtworkId, UserId};
use platform::cache::MemoryCache;
use std::sync::Arc;

/// Outcome of a completed purchase
#[derive(Debug)]
pub struct PurchaseOutput {
    pub details: ArtworkDetails,
    pub transaction_id: String,
    pub amount: f64,
}

/// Purchase Artwork Use Case
///
/// Funds move from the marketplace escrow account to a synthetic seller
/// account; the relational purchase record is the source of truth for
/// access rights. The artwork stays listed after a purchase (multiple
/// buyers may each buy it once).
pub struct PurchaseArtworkUseCase<R, L>
where
    R: ArtworkRepository,
    L: Ledger,
{
    repo: Arc<R>,
    ledger: Arc<L>,
    cache: Arc<MemoryCache>,
    config: Arc<ArtworkConfig>,
}

impl<R, L> PurchaseArtworkUseCase<R, L>
where
    R: ArtworkRepository,
    L: Ledger,
{
    pub fn new(
        repo: Arc<R>,
        ledger: Arc<L>,
        cache: Arc<MemoryCache>,
        config: Arc<ArtworkConfig>,
    ) -> Self {
        Self {
            repo,
            ledger,
            cache,
            config,
        }
    }

    pub async fn execute(
        &self,
        artwork_id: ArtworkId,
        buyer_id: UserId,
    ) -> ArtworkResult<PurchaseOutput> {
        if !artwork_id.is_valid() {
            return Err(ArtworkError::Validation("Invalid artwork ID".to_string()));
        }
        if !buyer_id.is_valid() {
            return Err(ArtworkError::Validation("Invalid user ID".to_string()));
        }

        let details = self
            .repo
            .find_by_id(artwork_id)
            .await?
            .ok_or(ArtworkError::NotFound)?;
        let artwork = &details.artwork;

        if artwork.owner_id == buyer_id {
            return Err(ArtworkError::Forbidden(
                "You cannot purchase your own artwork".to_string(),
            ));
        }
        let Some(price) = artwork.sale_price.filter(|_| artwork.is_purchasable()) else {
            return Err(ArtworkError::NotAvailable);
        };
        if self.repo.has_purchased(buyer_id, artwork_id).await? {
            return Err(ArtworkError::AlreadyPurchased);
        }

        let buyer_account = self.config.marketplace_account.clone();
        let seller_account = LedgerAccount::for_seller(artwork.owner_id);

        let balance = self.ledger.get_balance(&buyer_account).await;
        if balance < price {
            return Err(ArtworkError::InsufficientFunds {
                required: price,
                available: balance,
            });
        }

        let payment = self
            .ledger
            .transfer(&buyer_account, &seller_account, price)
            .await;
        let Some(transaction_id) = payment.transaction_id.filter(|_| payment.success) else {
            return Err(ArtworkError::Payment(
                payment.error.unwrap_or_else(|| "unknown".to_string()),
            ));
        };

        // The unique (buyer, artwork) index turns a concurrent double
        // purchase into AlreadyPurchased here.
        let record = PurchaseRecord::new(artwork_id, buyer_id, price, transaction_id.clone());
        self.repo.add_purchase_record(&record).await?;

        tracing::info!(
            artwork_id = %artwork_id,
            buyer_id = %buyer_id,
            amount = price,
            transaction_id = %transaction_id,
            "artwork purchased"
        );

        self.cache.remove(cache_keys::MARKETPLACE);
        self.cache.remove(&cache_keys::purchased_artworks(buyer_id));
        self.cache.remove(&cache_keys::user_artworks(artwork.owner_id));
        self.cache.remove(&cache_keys::seller_stats(artwork.owner_id));

        Ok(PurchaseOutput {
            details,
            transaction_id,
            amount: price,
        })
    }
}
