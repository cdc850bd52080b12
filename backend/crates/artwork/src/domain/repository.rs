//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{Artwork, ArtworkDetails, LedgerRecord, PurchaseRecord};
use crate::domain::value_objects::ContentHash;
use crate::error::ArtworkResult;
use kernel::id::{ArtworkId, LedgerRecordId, PurchaseId, UserId};

/// Artwork repository trait
///
/// Read paths return [`ArtworkDetails`] (artwork + owner + anchoring history);
/// list results are ordered newest first.
#[trait_variant::make(ArtworkRepository: Send)]
pub trait LocalArtworkRepository {
    /// Insert a new artwork and return its assigned id.
    /// A concurrent insert of the same content hash surfaces as
    /// [`crate::ArtworkError::DuplicateArtwork`].
    async fn insert_artwork(&self, artwork: &Artwork) -> ArtworkResult<ArtworkId>;

    /// Persist the mutable fields of an existing artwork
    async fn update_artwork(&self, artwork: &Artwork) -> ArtworkResult<()>;

    /// Delete an artwork and its dependent records
    async fn delete_artwork(&self, artwork_id: ArtworkId) -> ArtworkResult<()>;

    /// Get an artwork with owner and anchoring history
    async fn find_by_id(&self, artwork_id: ArtworkId) -> ArtworkResult<Option<ArtworkDetails>>;

    /// Look up an artwork by its content hash
    async fn find_by_content_hash(
        &self,
        hash: &ContentHash,
    ) -> ArtworkResult<Option<ArtworkDetails>>;

    /// Look up the artwork anchored by a ledger transaction id
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> ArtworkResult<Option<ArtworkDetails>>;

    /// All artworks owned by a user
    async fn list_by_owner(&self, owner_id: UserId) -> ArtworkResult<Vec<ArtworkDetails>>;

    /// All artworks currently listed for sale
    async fn list_for_sale(&self) -> ArtworkResult<Vec<ArtworkDetails>>;

    /// All artworks a user has purchased
    async fn list_purchased_by(&self, buyer_id: UserId) -> ArtworkResult<Vec<ArtworkDetails>>;

    /// All purchase records of artworks owned by a seller
    async fn list_purchases_for_seller(
        &self,
        seller_id: UserId,
    ) -> ArtworkResult<Vec<PurchaseRecord>>;

    /// Whether the buyer already purchased the artwork
    async fn has_purchased(&self, buyer_id: UserId, artwork_id: ArtworkId) -> ArtworkResult<bool>;

    /// Record a ledger anchoring for an artwork
    async fn add_ledger_record(&self, record: &LedgerRecord) -> ArtworkResult<LedgerRecordId>;

    /// Record a completed purchase.
    /// A concurrent purchase by the same buyer surfaces as
    /// [`crate::ArtworkError::AlreadyPurchased`].
    async fn add_purchase_record(&self, record: &PurchaseRecord) -> ArtworkResult<PurchaseId>;
}
