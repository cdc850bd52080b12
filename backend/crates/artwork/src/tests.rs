//! Use-case tests against an in-memory repository and the instant
//! simulated ledger

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::application::config::{ArtworkConfig, cache_keys};
use crate::application::download::DownloadArtworkUseCase;
use crate::application::listing::ListForSaleUseCase;
use crate::application::purchase::PurchaseArtworkUseCase;
use crate::application::seller_stats::SellerStatsUseCase;
use crate::application::upload::{UploadArtworkUseCase, UploadInput, UploadOutput};
use crate::application::verify::{VerifyArtworkUseCase, VerifyInput};
use crate::domain::entities::{Artwork, ArtworkDetails, LedgerRecord, OwnerSummary, PurchaseRecord};
use crate::domain::repository::ArtworkRepository;
use crate::domain::value_objects::ContentHash;
use crate::error::{ArtworkError, ArtworkResult};
use crate::infra::images::ImageStore;
use crate::infra::ledger::{LedgerSimConfig, SimulatedLedger};
use kernel::id::{ArtworkId, LedgerRecordId, PurchaseId, UserId};
use platform::cache::MemoryCache;

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct MemoryState {
    artworks: Vec<Artwork>,
    owners: HashMap<i64, OwnerSummary>,
    ledger_records: Vec<LedgerRecord>,
    purchases: Vec<PurchaseRecord>,
    next_artwork_id: i64,
    next_record_id: i64,
    next_purchase_id: i64,
}

/// In-memory [`ArtworkRepository`], enforcing the same uniqueness the
/// database indexes enforce
#[derive(Clone, Default)]
struct MemoryRepo {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRepo {
    fn with_user(self, user_id: UserId, username: &str, role: &str) -> Self {
        self.state.lock().unwrap().owners.insert(
            user_id.get(),
            OwnerSummary {
                id: user_id,
                username: username.to_string(),
                role: role.to_string(),
                created_at: Utc::now(),
            },
        );
        self
    }

    fn purchase_count(&self) -> usize {
        self.state.lock().unwrap().purchases.len()
    }

    fn details_for(state: &MemoryState, artwork: &Artwork) -> ArtworkDetails {
        ArtworkDetails {
            artwork: artwork.clone(),
            owner: state.owners.get(&artwork.owner_id.get()).cloned(),
            ledger_records: state
                .ledger_records
                .iter()
                .filter(|r| r.artwork_id == artwork.id)
                .cloned()
                .collect(),
            purchase_records: state
                .purchases
                .iter()
                .filter(|p| p.artwork_id == artwork.id)
                .cloned()
                .collect(),
        }
    }
}

impl ArtworkRepository for MemoryRepo {
    async fn insert_artwork(&self, artwork: &Artwork) -> ArtworkResult<ArtworkId> {
        let mut state = self.state.lock().unwrap();
        if state
            .artworks
            .iter()
            .any(|a| a.content_hash == artwork.content_hash)
        {
            return Err(ArtworkError::DuplicateArtwork);
        }
        state.next_artwork_id += 1;
        let id = ArtworkId::new(state.next_artwork_id);
        let mut stored = artwork.clone();
        stored.id = id;
        state.artworks.push(stored);
        Ok(id)
    }

    async fn update_artwork(&self, artwork: &Artwork) -> ArtworkResult<()> {
        let mut state = self.state.lock().unwrap();
        match state.artworks.iter_mut().find(|a| a.id == artwork.id) {
            Some(stored) => {
                *stored = artwork.clone();
                Ok(())
            }
            None => Err(ArtworkError::NotFound),
        }
    }

    async fn delete_artwork(&self, artwork_id: ArtworkId) -> ArtworkResult<()> {
        let mut state = self.state.lock().unwrap();
        state.artworks.retain(|a| a.id != artwork_id);
        state.ledger_records.retain(|r| r.artwork_id != artwork_id);
        state.purchases.retain(|p| p.artwork_id != artwork_id);
        Ok(())
    }

    async fn find_by_id(&self, artwork_id: ArtworkId) -> ArtworkResult<Option<ArtworkDetails>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .artworks
            .iter()
            .find(|a| a.id == artwork_id)
            .map(|a| Self::details_for(&state, a)))
    }

    async fn find_by_content_hash(
        &self,
        hash: &ContentHash,
    ) -> ArtworkResult<Option<ArtworkDetails>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .artworks
            .iter()
            .find(|a| &a.content_hash == hash)
            .map(|a| Self::details_for(&state, a)))
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> ArtworkResult<Option<ArtworkDetails>> {
        let state = self.state.lock().unwrap();
        let artwork_id = state
            .ledger_records
            .iter()
            .find(|r| r.transaction_id == transaction_id)
            .map(|r| r.artwork_id);
        Ok(artwork_id.and_then(|id| {
            state
                .artworks
                .iter()
                .find(|a| a.id == id)
                .map(|a| Self::details_for(&state, a))
        }))
    }

    async fn list_by_owner(&self, owner_id: UserId) -> ArtworkResult<Vec<ArtworkDetails>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .artworks
            .iter()
            .filter(|a| a.owner_id == owner_id)
            .rev()
            .map(|a| Self::details_for(&state, a))
            .collect())
    }

    async fn list_for_sale(&self) -> ArtworkResult<Vec<ArtworkDetails>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .artworks
            .iter()
            .filter(|a| a.is_purchasable())
            .rev()
            .map(|a| Self::details_for(&state, a))
            .collect())
    }

    async fn list_purchased_by(&self, buyer_id: UserId) -> ArtworkResult<Vec<ArtworkDetails>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .purchases
            .iter()
            .filter(|p| p.buyer_id == buyer_id)
            .rev()
            .filter_map(|p| {
                state
                    .artworks
                    .iter()
                    .find(|a| a.id == p.artwork_id)
                    .map(|a| Self::details_for(&state, a))
            })
            .collect())
    }

    async fn list_purchases_for_seller(
        &self,
        seller_id: UserId,
    ) -> ArtworkResult<Vec<PurchaseRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .purchases
            .iter()
            .filter(|p| {
                state
                    .artworks
                    .iter()
                    .any(|a| a.id == p.artwork_id && a.owner_id == seller_id)
            })
            .cloned()
            .collect())
    }

    async fn has_purchased(&self, buyer_id: UserId, artwork_id: ArtworkId) -> ArtworkResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state
            .purchases
            .iter()
            .any(|p| p.buyer_id == buyer_id && p.artwork_id == artwork_id))
    }

    async fn add_ledger_record(&self, record: &LedgerRecord) -> ArtworkResult<LedgerRecordId> {
        let mut state = self.state.lock().unwrap();
        state.next_record_id += 1;
        let id = LedgerRecordId::new(state.next_record_id);
        let mut stored = record.clone();
        stored.id = id;
        state.ledger_records.push(stored);
        Ok(id)
    }

    async fn add_purchase_record(&self, record: &PurchaseRecord) -> ArtworkResult<PurchaseId> {
        let mut state = self.state.lock().unwrap();
        if state
            .purchases
            .iter()
            .any(|p| p.buyer_id == record.buyer_id && p.artwork_id == record.artwork_id)
        {
            return Err(ArtworkError::AlreadyPurchased);
        }
        state.next_purchase_id += 1;
        let id = PurchaseId::new(state.next_purchase_id);
        let mut stored = record.clone();
        stored.id = id;
        state.purchases.push(stored);
        Ok(id)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

const SELLER: UserId = UserId::new(1);
const BUYER: UserId = UserId::new(2);
const STRANGER: UserId = UserId::new(3);

struct TestEnv {
    repo: Arc<MemoryRepo>,
    ledger: Arc<SimulatedLedger>,
    images: Arc<ImageStore>,
    cache: Arc<MemoryCache>,
    config: Arc<ArtworkConfig>,
    _storage: tempfile::TempDir,
}

fn test_env() -> TestEnv {
    let storage = tempfile::tempdir().unwrap();
    let repo = MemoryRepo::default()
        .with_user(SELLER, "alice", "Seller")
        .with_user(BUYER, "bob", "Buyer")
        .with_user(STRANGER, "carol", "Buyer");
    TestEnv {
        repo: Arc::new(repo),
        ledger: Arc::new(SimulatedLedger::new(LedgerSimConfig::instant())),
        images: Arc::new(ImageStore::new(storage.path(), "http://localhost:5000")),
        cache: Arc::new(MemoryCache::new()),
        config: Arc::new(ArtworkConfig::default()),
        _storage: storage,
    }
}

impl TestEnv {
    async fn upload(&self, bytes: &[u8], file_name: &str, use_ledger: bool) -> UploadOutput {
        self.try_upload(bytes, file_name, use_ledger).await.unwrap()
    }

    async fn try_upload(
        &self,
        bytes: &[u8],
        file_name: &str,
        use_ledger: bool,
    ) -> ArtworkResult<UploadOutput> {
        let use_case = UploadArtworkUseCase::new(
            self.repo.clone(),
            self.ledger.clone(),
            self.images.clone(),
            self.cache.clone(),
        );
        use_case
            .execute(UploadInput {
                owner_id: SELLER,
                file_name: file_name.to_string(),
                content_type: "image/png".to_string(),
                bytes: bytes.to_vec(),
                use_ledger,
            })
            .await
    }

    async fn list(&self, artwork_id: ArtworkId, price: f64) -> ArtworkResult<ArtworkDetails> {
        ListForSaleUseCase::new(self.repo.clone(), self.cache.clone())
            .execute(artwork_id, price, SELLER)
            .await
    }

    async fn purchase(
        &self,
        artwork_id: ArtworkId,
        buyer: UserId,
    ) -> ArtworkResult<crate::application::purchase::PurchaseOutput> {
        PurchaseArtworkUseCase::new(
            self.repo.clone(),
            self.ledger.clone(),
            self.cache.clone(),
            self.config.clone(),
        )
        .execute(artwork_id, buyer)
        .await
    }
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn upload_computes_the_known_hash_of_the_bytes() {
    let env = test_env();
    let output = env.upload(b"abc123", "art.png", false).await;

    assert_eq!(
        output.details.artwork.content_hash.as_str(),
        "6ca13d52ca70c883e0f0bb101e425a89e8624de51db2d2392593af6a84118090"
    );
    assert!(output.transaction_id.is_none());
    assert!(output.details.ledger_records.is_empty());
}

#[tokio::test]
async fn upload_stores_the_image_and_records_the_path() {
    let env = test_env();
    let output = env.upload(b"pixels", "sunset.png", false).await;

    let path = output.details.artwork.image_path.expect("image path set");
    assert!(path.starts_with("images/artworks/"));
    assert!(path.ends_with(".png"));
    assert_eq!(env.images.image_bytes(&path).await.unwrap(), b"pixels");
}

#[tokio::test]
async fn upload_rejects_a_duplicate_of_registered_content() {
    let env = test_env();
    env.upload(b"abc123", "first.png", false).await;

    let err = env.try_upload(b"abc123", "second.png", false).await;
    assert!(matches!(err, Err(ArtworkError::DuplicateArtwork)));
}

#[tokio::test]
async fn upload_rejects_an_empty_file() {
    let env = test_env();
    let err = env.try_upload(b"", "empty.png", false).await;
    assert!(matches!(err, Err(ArtworkError::Validation(_))));
}

#[tokio::test]
async fn upload_anchors_the_hash_when_asked() {
    let env = test_env();
    let output = env.upload(b"abc123", "art.png", true).await;

    let tx = output.transaction_id.expect("anchoring transaction id");
    assert!(tx.starts_with("0.0."));
    assert!(tx.contains('@'));
    assert_eq!(output.details.latest_transaction_id(), Some(tx.as_str()));
    assert_eq!(output.details.ledger_records[0].status, "SUCCESS");
}

#[tokio::test]
async fn upload_survives_an_image_storage_failure() {
    let storage = tempfile::tempdir().unwrap();
    // A plain file as storage root makes every directory creation fail
    let blocked = storage.path().join("blocked");
    std::fs::write(&blocked, b"x").unwrap();

    let env = TestEnv {
        images: Arc::new(ImageStore::new(&blocked, "http://localhost:5000")),
        ..test_env()
    };
    let output = env.upload(b"abc123", "art.png", false).await;

    assert!(output.details.artwork.image_path.is_none());
}

#[tokio::test]
async fn upload_invalidates_the_marketplace_cache() {
    let env = test_env();
    env.cache.set_json(
        cache_keys::MARKETPLACE,
        &vec!["stale"],
        std::time::Duration::from_secs(60),
    );

    env.upload(b"abc123", "art.png", false).await;

    assert!(env.cache.get(cache_keys::MARKETPLACE).is_none());
}

#[tokio::test]
async fn a_buyer_can_upload_through_the_handler() {
    use auth::CurrentUser;
    use auth::models::user_role::UserRole;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::post;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    use crate::presentation::handlers::{self, ArtworkAppState};

    let env = test_env();
    let state = ArtworkAppState {
        repo: env.repo.clone(),
        ledger: env.ledger.clone(),
        images: env.images.clone(),
        cache: env.cache.clone(),
        config: env.config.clone(),
    };
    let app = Router::new()
        .route("/upload", post(handlers::upload::<MemoryRepo, SimulatedLedger>))
        .layer(Extension(CurrentUser { user_id: BUYER, role: UserRole::Buyer }))
        .with_state(state);

    let boundary = "----artverse-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"art.png\"\r\n\
         Content-Type: image/png\r\n\
         \r\n\
         abc123\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(env.repo.list_by_owner(BUYER).await.unwrap().len(), 1);
}

// ============================================================================
// Listing and purchase
// ============================================================================

#[tokio::test]
async fn list_then_purchase_produces_exactly_one_purchase_record() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;
    env.list(artwork_id, 2.5).await.unwrap();

    let output = env.purchase(artwork_id, BUYER).await.unwrap();

    assert_eq!(output.amount, 2.5);
    assert!(output.transaction_id.starts_with("0.0."));
    assert_eq!(env.repo.purchase_count(), 1);
    assert!(env.repo.has_purchased(BUYER, artwork_id).await.unwrap());
}

#[tokio::test]
async fn find_by_id_carries_the_purchase_history() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;

    let before = env.repo.find_by_id(artwork_id).await.unwrap().unwrap();
    assert!(before.purchase_records.is_empty());

    env.list(artwork_id, 2.5).await.unwrap();
    env.purchase(artwork_id, BUYER).await.unwrap();

    let after = env.repo.find_by_id(artwork_id).await.unwrap().unwrap();
    assert_eq!(after.purchase_records.len(), 1);
    let record = &after.purchase_records[0];
    assert_eq!(record.buyer_id, BUYER);
    assert_eq!(record.artwork_id, artwork_id);
    assert_eq!(record.purchase_price, 2.5);
}

#[tokio::test]
async fn a_buyer_cannot_purchase_the_same_artwork_twice() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;
    env.list(artwork_id, 2.5).await.unwrap();
    env.purchase(artwork_id, BUYER).await.unwrap();

    let err = env.purchase(artwork_id, BUYER).await;
    assert!(matches!(err, Err(ArtworkError::AlreadyPurchased)));
    assert_eq!(env.repo.purchase_count(), 1);
}

#[tokio::test]
async fn the_artwork_stays_listed_after_a_purchase() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;
    env.list(artwork_id, 2.5).await.unwrap();
    env.purchase(artwork_id, BUYER).await.unwrap();

    // A second buyer can still buy it
    env.purchase(artwork_id, STRANGER).await.unwrap();
    assert_eq!(env.repo.purchase_count(), 2);
}

#[tokio::test]
async fn an_owner_cannot_purchase_their_own_artwork() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;
    env.list(artwork_id, 2.5).await.unwrap();

    let err = env.purchase(artwork_id, SELLER).await;
    assert!(matches!(err, Err(ArtworkError::Forbidden(_))));
}

#[tokio::test]
async fn an_unlisted_artwork_is_not_available() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;

    let err = env.purchase(artwork_id, BUYER).await;
    assert!(matches!(err, Err(ArtworkError::NotAvailable)));
}

#[tokio::test]
async fn a_price_above_the_escrow_balance_is_rejected() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;
    // The marketplace escrow account holds a fixed 100.0
    env.list(artwork_id, 250.0).await.unwrap();

    let err = env.purchase(artwork_id, BUYER).await;
    match err {
        Err(ArtworkError::InsufficientFunds {
            required,
            available,
        }) => {
            assert_eq!(required, 250.0);
            assert_eq!(available, 100.0);
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }
}

#[tokio::test]
async fn only_the_owner_can_list_an_artwork() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;

    let err = ListForSaleUseCase::new(env.repo.clone(), env.cache.clone())
        .execute(artwork_id, 2.5, BUYER)
        .await;
    assert!(matches!(err, Err(ArtworkError::Forbidden(_))));
}

#[tokio::test]
async fn listing_rejects_a_non_positive_price() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;

    for price in [0.0, -2.5, f64::NAN] {
        let err = env.list(artwork_id, price).await;
        assert!(matches!(err, Err(ArtworkError::Validation(_))));
    }
}

#[tokio::test]
async fn deleting_an_artwork_removes_its_dependent_records() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", true).await.details.artwork.id;
    env.list(artwork_id, 2.5).await.unwrap();
    env.purchase(artwork_id, BUYER).await.unwrap();

    env.repo.delete_artwork(artwork_id).await.unwrap();

    assert!(env.repo.find_by_id(artwork_id).await.unwrap().is_none());
    assert!(!env.repo.has_purchased(BUYER, artwork_id).await.unwrap());
    assert_eq!(env.repo.purchase_count(), 0);
}

// ============================================================================
// Download authorization
// ============================================================================

#[tokio::test]
async fn download_is_limited_to_the_owner_and_buyers() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;
    env.list(artwork_id, 2.5).await.unwrap();
    env.purchase(artwork_id, BUYER).await.unwrap();

    let use_case = DownloadArtworkUseCase::new(env.repo.clone());

    let owner = use_case.execute(artwork_id, SELLER).await.unwrap();
    assert!(owner.is_some());

    let buyer = use_case.execute(artwork_id, BUYER).await.unwrap();
    assert!(buyer.is_some());

    let stranger = use_case.execute(artwork_id, STRANGER).await;
    assert!(matches!(stranger, Err(ArtworkError::Forbidden(_))));
}

#[tokio::test]
async fn download_of_an_unknown_artwork_is_none() {
    let env = test_env();
    let info = DownloadArtworkUseCase::new(env.repo.clone())
        .execute(ArtworkId::new(999), SELLER)
        .await
        .unwrap();
    assert!(info.is_none());
}

// ============================================================================
// Verification
// ============================================================================

#[tokio::test]
async fn registered_content_verifies_and_modified_content_does_not() {
    let env = test_env();
    env.upload(b"abc123", "art.png", true).await;

    let use_case = VerifyArtworkUseCase::new(env.repo.clone());

    let original = use_case
        .execute(VerifyInput {
            file_bytes: Some(b"abc123".to_vec()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(original.is_verified);
    assert_eq!(original.message, "Artwork verified successfully");
    assert!(original.details.is_some());

    let modified = use_case
        .execute(VerifyInput {
            file_bytes: Some(b"abc124".to_vec()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!modified.is_verified);
    assert_eq!(modified.message, "Artwork not found in the system");
    assert!(modified.details.is_none());
}

#[tokio::test]
async fn verification_resolves_by_hash_and_by_transaction_id() {
    let env = test_env();
    let output = env.upload(b"abc123", "art.png", true).await;
    let hash = output.details.artwork.content_hash.as_str().to_string();
    let tx = output.transaction_id.unwrap();

    let use_case = VerifyArtworkUseCase::new(env.repo.clone());

    let by_hash = use_case
        .execute(VerifyInput {
            file_hash: Some(hash),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(by_hash.is_verified);

    let by_tx = use_case
        .execute(VerifyInput {
            transaction_id: Some(tx),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(by_tx.is_verified);

    let unknown = use_case
        .execute(VerifyInput {
            transaction_id: Some("0.0.123@456.789".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!unknown.is_verified);
}

#[tokio::test]
async fn a_malformed_hash_is_a_negative_result_not_an_error() {
    let env = test_env();
    env.upload(b"abc123", "art.png", false).await;

    let result = VerifyArtworkUseCase::new(env.repo.clone())
        .execute(VerifyInput {
            file_hash: Some("not-a-hash".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!result.is_verified);
}

#[tokio::test]
async fn verification_without_any_input_is_rejected() {
    let env = test_env();
    let err = VerifyArtworkUseCase::new(env.repo.clone())
        .execute(VerifyInput::default())
        .await;
    assert!(matches!(err, Err(ArtworkError::Validation(_))));
}

// ============================================================================
// Seller statistics
// ============================================================================

#[tokio::test]
async fn seller_stats_aggregate_sales_revenue_and_listings() {
    let env = test_env();
    let first = env.upload(b"abc123", "one.png", false).await.details.artwork.id;
    let second = env.upload(b"xyz789", "two.png", false).await.details.artwork.id;
    env.list(first, 2.5).await.unwrap();
    env.list(second, 10.0).await.unwrap();
    env.purchase(first, BUYER).await.unwrap();
    env.purchase(first, STRANGER).await.unwrap();

    let stats = SellerStatsUseCase::new(env.repo.clone(), env.cache.clone(), env.config.clone())
        .execute(SELLER)
        .await
        .unwrap();

    assert_eq!(stats.total_sales, 2);
    assert_eq!(stats.total_revenue, 5.0);
    assert_eq!(stats.listed_artworks, 2);
}

#[tokio::test]
async fn seller_stats_are_served_from_the_cache_until_invalidated() {
    let env = test_env();
    let artwork_id = env.upload(b"abc123", "art.png", false).await.details.artwork.id;
    env.list(artwork_id, 2.5).await.unwrap();

    let use_case =
        SellerStatsUseCase::new(env.repo.clone(), env.cache.clone(), env.config.clone());
    let before = use_case.execute(SELLER).await.unwrap();
    assert_eq!(before.total_sales, 0);

    // The purchase invalidates the seller's cached stats
    env.purchase(artwork_id, BUYER).await.unwrap();

    let after = use_case.execute(SELLER).await.unwrap();
    assert_eq!(after.total_sales, 1);
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[tokio::test]
async fn register_list_buy_and_verify() {
    let env = test_env();

    let output = env.upload(b"abc123", "genesis.png", true).await;
    let artwork_id = output.details.artwork.id;
    assert_eq!(
        output.details.artwork.content_hash.as_str(),
        "6ca13d52ca70c883e0f0bb101e425a89e8624de51db2d2392593af6a84118090"
    );

    let listed = env.list(artwork_id, 2.5).await.unwrap();
    assert!(listed.artwork.is_purchasable());

    let purchase = env.purchase(artwork_id, BUYER).await.unwrap();
    assert_eq!(purchase.amount, 2.5);

    let verify = VerifyArtworkUseCase::new(env.repo.clone());
    assert!(
        verify
            .execute(VerifyInput {
                file_bytes: Some(b"abc123".to_vec()),
                ..Default::default()
            })
            .await
            .unwrap()
            .is_verified
    );
    assert!(
        !verify
            .execute(VerifyInput {
                file_bytes: Some(b"abc124".to_vec()),
                ..Default::default()
            })
            .await
            .unwrap()
            .is_verified
    );
}
