//! Domain Entities
//!
//! Core business entities for the artwork domain.

use crate::domain::value_objects::ContentHash;
use chrono::{DateTime, Utc};
use kernel::id::{ArtworkId, LedgerRecordId, PurchaseId, UserId};

/// Artwork entity - a registered digital artwork
///
/// Identity is the SHA-256 content hash; the surrogate id is assigned by
/// the database on insert.
#[derive(Debug, Clone)]
pub struct Artwork {
    pub id: ArtworkId,
    pub owner_id: UserId,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub content_hash: ContentHash,
    pub perceptual_hash: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_listed_for_sale: bool,
    pub sale_price: Option<f64>,
}

impl Artwork {
    /// Create a new, not-yet-persisted artwork (id is assigned on insert)
    pub fn new(
        owner_id: UserId,
        file_name: String,
        content_type: String,
        file_size: i64,
        content_hash: ContentHash,
        perceptual_hash: Option<String>,
    ) -> Self {
        Self {
            id: ArtworkId::new(0),
            owner_id,
            file_name,
            content_type,
            file_size,
            content_hash,
            perceptual_hash,
            image_path: None,
            created_at: Utc::now(),
            is_listed_for_sale: false,
            sale_price: None,
        }
    }

    /// List the artwork for sale at the given price.
    /// The listing flag and the price are always set together.
    pub fn list_for_sale(&mut self, price: f64) {
        self.is_listed_for_sale = true;
        self.sale_price = Some(price);
    }

    /// Whether the artwork can currently be bought
    pub fn is_purchasable(&self) -> bool {
        self.is_listed_for_sale && self.sale_price.is_some_and(|p| p > 0.0)
    }
}

/// LedgerRecord entity - the anchoring of an artwork hash on the ledger
#[derive(Debug, Clone)]
pub struct LedgerRecord {
    pub id: LedgerRecordId,
    pub artwork_id: ArtworkId,
    pub transaction_id: String,
    pub consensus_timestamp: DateTime<Utc>,
    pub memo: String,
    pub status: String,
    pub recorded_at: DateTime<Utc>,
}

impl LedgerRecord {
    /// Create a confirmed anchoring record for a fresh ledger submission
    pub fn confirmed(artwork_id: ArtworkId, transaction_id: String, memo: String) -> Self {
        let now = Utc::now();
        Self {
            id: LedgerRecordId::new(0),
            artwork_id,
            transaction_id,
            consensus_timestamp: now,
            memo,
            status: "SUCCESS".to_string(),
            recorded_at: now,
        }
    }
}

/// PurchaseRecord entity - a completed marketplace purchase
#[derive(Debug, Clone)]
pub struct PurchaseRecord {
    pub id: PurchaseId,
    pub artwork_id: ArtworkId,
    pub buyer_id: UserId,
    pub purchase_price: f64,
    pub purchase_date: DateTime<Utc>,
    pub transaction_id: String,
}

impl PurchaseRecord {
    /// Create a new, not-yet-persisted purchase record
    pub fn new(
        artwork_id: ArtworkId,
        buyer_id: UserId,
        purchase_price: f64,
        transaction_id: String,
    ) -> Self {
        Self {
            id: PurchaseId::new(0),
            artwork_id,
            buyer_id,
            purchase_price,
            purchase_date: Utc::now(),
            transaction_id,
        }
    }
}

/// Minimal owner projection joined onto artwork reads
#[derive(Debug, Clone)]
pub struct OwnerSummary {
    pub id: UserId,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// An artwork together with its owner, anchoring history and purchases,
/// the unit returned by all read paths
#[derive(Debug, Clone)]
pub struct ArtworkDetails {
    pub artwork: Artwork,
    pub owner: Option<OwnerSummary>,
    pub ledger_records: Vec<LedgerRecord>,
    pub purchase_records: Vec<PurchaseRecord>,
}

impl ArtworkDetails {
    /// Transaction id of the most recent anchoring, if any
    pub fn latest_transaction_id(&self) -> Option<&str> {
        self.ledger_records
            .iter()
            .max_by_key(|r| r.recorded_at)
            .map(|r| r.transaction_id.as_str())
    }
}
