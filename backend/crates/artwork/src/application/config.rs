//! Application Configuration
//!
//! Configuration for the artwork application layer.

use crate::domain::value_objects::LedgerAccount;
use std::time::Duration;

/// Artwork application configuration
#[derive(Debug, Clone)]
pub struct ArtworkConfig {
    /// Marketplace escrow account that pays for purchases
    pub marketplace_account: LedgerAccount,
    /// Cache TTL for a user's own artworks
    pub user_artworks_ttl: Duration,
    /// Cache TTL for a user's purchased artworks
    pub purchased_artworks_ttl: Duration,
    /// Cache TTL for the marketplace listing
    pub marketplace_ttl: Duration,
    /// Cache TTL for seller statistics
    pub seller_stats_ttl: Duration,
    /// Cache TTL for verification results
    pub verify_ttl: Duration,
    /// Cache TTL for authenticated image bytes
    pub image_ttl: Duration,
    /// Cache TTL for publicly served image bytes
    pub public_image_ttl: Duration,
    /// Cache TTL for image existence probes
    pub image_exists_ttl: Duration,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            marketplace_account: LedgerAccount::new("0.0.6945291"),
            user_artworks_ttl: Duration::from_secs(2 * 60),
            purchased_artworks_ttl: Duration::from_secs(2 * 60),
            marketplace_ttl: Duration::from_secs(3 * 60),
            seller_stats_ttl: Duration::from_secs(2 * 60),
            verify_ttl: Duration::from_secs(5 * 60),
            image_ttl: Duration::from_secs(10 * 60),
            public_image_ttl: Duration::from_secs(15 * 60),
            image_exists_ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// Cache key builders, shared by use cases and handlers so that writers
/// invalidate exactly what readers populate
pub mod cache_keys {
    use kernel::id::UserId;

    pub const MARKETPLACE: &str = "marketplace_artworks";

    pub fn user_artworks(user_id: UserId) -> String {
        format!("user_artworks_{user_id}")
    }

    pub fn purchased_artworks(user_id: UserId) -> String {
        format!("purchased_artworks_{user_id}")
    }

    pub fn seller_stats(user_id: UserId) -> String {
        format!("seller_stats_{user_id}")
    }

    pub fn verify(file_hash: &str, transaction_id: &str) -> String {
        format!("verify_{file_hash}_{transaction_id}")
    }

    pub fn image(image_path: &str) -> String {
        format!("image_{image_path}")
    }

    pub fn image_exists(image_path: &str) -> String {
        format!("image_exists_{image_path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    #[test]
    fn default_ttls_match_the_documented_cadence() {
        let config = ArtworkConfig::default();
        assert_eq!(config.user_artworks_ttl, Duration::from_secs(120));
        assert_eq!(config.marketplace_ttl, Duration::from_secs(180));
        assert_eq!(config.verify_ttl, Duration::from_secs(300));
        assert_eq!(config.public_image_ttl, Duration::from_secs(900));
        assert_eq!(config.marketplace_account.as_str(), "0.0.6945291");
    }

    #[test]
    fn cache_keys_embed_the_user_id() {
        let user = UserId::new(7);
        assert_eq!(cache_keys::user_artworks(user), "user_artworks_7");
        assert_eq!(cache_keys::purchased_artworks(user), "purchased_artworks_7");
        assert_eq!(cache_keys::seller_stats(user), "seller_stats_7");
        assert_eq!(cache_keys::verify("abc", ""), "verify_abc_");
    }
}
