//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::seller_stats::SellerStats;
use crate::domain::entities::ArtworkDetails;
use crate::infra::images::ImageStore;

/// Transaction id reported for artworks that were never anchored
pub const NOT_REGISTERED: &str = "NOT_REGISTERED";

// ============================================================================
// Artwork
// ============================================================================

/// Owner info embedded in artwork responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkOwnerDto {
    pub id: i64,
    pub username: String,
    pub role: String,
}

/// Artwork response shape shared by every read path
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkDto {
    pub id: i64,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub content_hash: String,
    pub perceptual_hash: Option<String>,
    pub image_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub is_listed_for_sale: bool,
    pub sale_price: Option<f64>,
    /// Latest anchoring transaction, or `NOT_REGISTERED`
    pub transaction_id: String,
    pub user: Option<ArtworkOwnerDto>,
}

impl ArtworkDto {
    pub fn from_details(details: &ArtworkDetails, images: &ImageStore) -> Self {
        let artwork = &details.artwork;
        Self {
            id: artwork.id.get(),
            file_name: artwork.file_name.clone(),
            file_type: artwork.content_type.clone(),
            file_size: artwork.file_size,
            content_hash: artwork.content_hash.as_str().to_string(),
            perceptual_hash: artwork.perceptual_hash.clone(),
            image_url: images.image_url(artwork.image_path.as_deref()),
            created_at: artwork.created_at,
            is_listed_for_sale: artwork.is_listed_for_sale,
            sale_price: artwork.sale_price,
            transaction_id: details
                .latest_transaction_id()
                .unwrap_or(NOT_REGISTERED)
                .to_string(),
            user: details.owner.as_ref().map(|owner| ArtworkOwnerDto {
                id: owner.id.get(),
                username: owner.username.clone(),
                role: owner.role.clone(),
            }),
        }
    }

    pub fn list_from_details(details: &[ArtworkDetails], images: &ImageStore) -> Vec<Self> {
        details
            .iter()
            .map(|d| Self::from_details(d, images))
            .collect()
    }
}

/// Upload response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub artwork: ArtworkDto,
    /// Set when the upload anchored the hash on the ledger
    pub transaction_id: Option<String>,
}

// ============================================================================
// Verification
// ============================================================================

/// Verification response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResultDto {
    pub is_verified: bool,
    pub message: String,
    pub artwork: Option<ArtworkDto>,
}

// ============================================================================
// Marketplace
// ============================================================================

/// List-for-sale request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListForSaleRequest {
    pub price: f64,
}

/// Purchase response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResultDto {
    pub success: bool,
    pub message: String,
    pub artwork: ArtworkDto,
    pub transaction_id: String,
    pub amount: f64,
}

/// Seller statistics response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerStatsDto {
    pub total_sales: i64,
    pub total_revenue: f64,
    pub listed_artworks: i64,
}

impl From<SellerStats> for SellerStatsDto {
    fn from(stats: SellerStats) -> Self {
        Self {
            total_sales: stats.total_sales,
            total_revenue: stats.total_revenue,
            listed_artworks: stats.listed_artworks,
        }
    }
}

// ============================================================================
// Images
// ============================================================================

/// Image existence probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageExistsResponse {
    pub exists: bool,
}
