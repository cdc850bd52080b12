//! PostgreSQL Repository Implementation

use crate::domain::entities::{
    Artwork, ArtworkDetails, LedgerRecord, OwnerSummary, PurchaseRecord,
};
use crate::domain::repository::ArtworkRepository;
use crate::domain::value_objects::ContentHash;
use crate::error::{ArtworkError, ArtworkResult};
use auth::models::user_role::UserRole;
use kernel::id::{ArtworkId, LedgerRecordId, PurchaseId, UserId};
use sqlx::PgPool;
use std::collections::HashMap;

/// PostgreSQL-backed artwork repository
#[derive(Clone)]
pub struct PgArtworkRepository {
    pool: PgPool,
}

impl PgArtworkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach owners, anchoring history and purchases to a batch of
    /// artwork rows, preserving row order
    async fn hydrate(&self, rows: Vec<ArtworkRow>) -> ArtworkResult<Vec<ArtworkDetails>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let artwork_ids: Vec<i64> = rows.iter().map(|r| r.artwork_id).collect();
        let owner_ids: Vec<i64> = rows.iter().map(|r| r.owner_id).collect();

        let owners = sqlx::query_as::<_, OwnerRow>(
            r#"
            SELECT user_id, username, user_role, created_at
            FROM users
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(&owner_ids)
        .fetch_all(&self.pool)
        .await?;
        let owners: HashMap<i64, OwnerRow> =
            owners.into_iter().map(|o| (o.user_id, o)).collect();

        let records = sqlx::query_as::<_, LedgerRecordRow>(
            r#"
            SELECT ledger_record_id, artwork_id, transaction_id,
                   consensus_timestamp, memo, status, recorded_at
            FROM ledger_records
            WHERE artwork_id = ANY($1)
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(&artwork_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut records_by_artwork: HashMap<i64, Vec<LedgerRecord>> = HashMap::new();
        for record in records {
            records_by_artwork
                .entry(record.artwork_id)
                .or_default()
                .push(record.into_record());
        }

        let purchases = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT purchase_id, artwork_id, buyer_id,
                   purchase_price, purchase_date, transaction_id
            FROM artwork_purchases
            WHERE artwork_id = ANY($1)
            ORDER BY purchase_date ASC
            "#,
        )
        .bind(&artwork_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut purchases_by_artwork: HashMap<i64, Vec<PurchaseRecord>> = HashMap::new();
        for purchase in purchases {
            purchases_by_artwork
                .entry(purchase.artwork_id)
                .or_default()
                .push(purchase.into_record());
        }

        rows.into_iter()
            .map(|row| {
                // Owners repeat across rows when a user owns several artworks
                let owner = owners.get(&row.owner_id).cloned().map(OwnerRow::into_owner);
                let ledger_records = records_by_artwork.remove(&row.artwork_id).unwrap_or_default();
                let purchase_records =
                    purchases_by_artwork.remove(&row.artwork_id).unwrap_or_default();
                Ok(ArtworkDetails {
                    artwork: row.into_artwork()?,
                    owner,
                    ledger_records,
                    purchase_records,
                })
            })
            .collect()
    }

    async fn hydrate_one(&self, row: Option<ArtworkRow>) -> ArtworkResult<Option<ArtworkDetails>> {
        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

impl ArtworkRepository for PgArtworkRepository {
    async fn insert_artwork(&self, artwork: &Artwork) -> ArtworkResult<ArtworkId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO artworks (
                owner_id,
                file_name,
                content_type,
                file_size,
                content_hash,
                perceptual_hash,
                image_path,
                created_at,
                is_listed_for_sale,
                sale_price
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING artwork_id
            "#,
        )
        .bind(artwork.owner_id.get())
        .bind(&artwork.file_name)
        .bind(&artwork.content_type)
        .bind(artwork.file_size)
        .bind(artwork.content_hash.as_str())
        .bind(&artwork.perceptual_hash)
        .bind(&artwork.image_path)
        .bind(artwork.created_at)
        .bind(artwork.is_listed_for_sale)
        .bind(artwork.sale_price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, ArtworkError::DuplicateArtwork))?;

        tracing::info!(artwork_id = id, owner_id = %artwork.owner_id, "artwork row inserted");
        Ok(ArtworkId::new(id))
    }

    async fn update_artwork(&self, artwork: &Artwork) -> ArtworkResult<()> {
        sqlx::query(
            r#"
            UPDATE artworks
            SET file_name = $2,
                content_type = $3,
                image_path = $4,
                is_listed_for_sale = $5,
                sale_price = $6
            WHERE artwork_id = $1
            "#,
        )
        .bind(artwork.id.get())
        .bind(&artwork.file_name)
        .bind(&artwork.content_type)
        .bind(&artwork.image_path)
        .bind(artwork.is_listed_for_sale)
        .bind(artwork.sale_price)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_artwork(&self, artwork_id: ArtworkId) -> ArtworkResult<()> {
        // Dependent ledger_records / artwork_purchases rows go with it (ON DELETE CASCADE)
        sqlx::query("DELETE FROM artworks WHERE artwork_id = $1")
            .bind(artwork_id.get())
            .execute(&self.pool)
            .await?;

        tracing::info!(artwork_id = %artwork_id, "artwork deleted");
        Ok(())
    }

    async fn find_by_id(&self, artwork_id: ArtworkId) -> ArtworkResult<Option<ArtworkDetails>> {
        let row = sqlx::query_as::<_, ArtworkRow>(
            "SELECT * FROM artworks WHERE artwork_id = $1",
        )
        .bind(artwork_id.get())
        .fetch_optional(&self.pool)
        .await?;
        self.hydrate_one(row).await
    }

    async fn find_by_content_hash(
        &self,
        hash: &ContentHash,
    ) -> ArtworkResult<Option<ArtworkDetails>> {
        let row = sqlx::query_as::<_, ArtworkRow>(
            "SELECT * FROM artworks WHERE content_hash = $1",
        )
        .bind(hash.as_str())
        .fetch_optional(&self.pool)
        .await?;
        self.hydrate_one(row).await
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> ArtworkResult<Option<ArtworkDetails>> {
        let row = sqlx::query_as::<_, ArtworkRow>(
            r#"
            SELECT a.*
            FROM artworks a
            JOIN ledger_records lr ON lr.artwork_id = a.artwork_id
            WHERE lr.transaction_id = $1
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;
        self.hydrate_one(row).await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> ArtworkResult<Vec<ArtworkDetails>> {
        let rows = sqlx::query_as::<_, ArtworkRow>(
            "SELECT * FROM artworks WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id.get())
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(rows).await
    }

    async fn list_for_sale(&self) -> ArtworkResult<Vec<ArtworkDetails>> {
        let rows = sqlx::query_as::<_, ArtworkRow>(
            r#"
            SELECT *
            FROM artworks
            WHERE is_listed_for_sale AND sale_price > 0
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(rows).await
    }

    async fn list_purchased_by(&self, buyer_id: UserId) -> ArtworkResult<Vec<ArtworkDetails>> {
        let rows = sqlx::query_as::<_, ArtworkRow>(
            r#"
            SELECT a.*
            FROM artworks a
            JOIN artwork_purchases p ON p.artwork_id = a.artwork_id
            WHERE p.buyer_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(buyer_id.get())
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(rows).await
    }

    async fn list_purchases_for_seller(
        &self,
        seller_id: UserId,
    ) -> ArtworkResult<Vec<PurchaseRecord>> {
        let rows = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT p.purchase_id, p.artwork_id, p.buyer_id,
                   p.purchase_price, p.purchase_date, p.transaction_id
            FROM artwork_purchases p
            JOIN artworks a ON a.artwork_id = p.artwork_id
            WHERE a.owner_id = $1
            ORDER BY p.purchase_date DESC
            "#,
        )
        .bind(seller_id.get())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(PurchaseRow::into_record).collect())
    }

    async fn has_purchased(&self, buyer_id: UserId, artwork_id: ArtworkId) -> ArtworkResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM artwork_purchases
                WHERE buyer_id = $1 AND artwork_id = $2
            )
            "#,
        )
        .bind(buyer_id.get())
        .bind(artwork_id.get())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn add_ledger_record(&self, record: &LedgerRecord) -> ArtworkResult<LedgerRecordId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO ledger_records (
                artwork_id,
                transaction_id,
                consensus_timestamp,
                memo,
                status,
                recorded_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING ledger_record_id
            "#,
        )
        .bind(record.artwork_id.get())
        .bind(&record.transaction_id)
        .bind(record.consensus_timestamp)
        .bind(&record.memo)
        .bind(&record.status)
        .bind(record.recorded_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            artwork_id = %record.artwork_id,
            transaction_id = %record.transaction_id,
            "ledger record stored"
        );
        Ok(LedgerRecordId::new(id))
    }

    async fn add_purchase_record(&self, record: &PurchaseRecord) -> ArtworkResult<PurchaseId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO artwork_purchases (
                artwork_id,
                buyer_id,
                purchase_price,
                purchase_date,
                transaction_id
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING purchase_id
            "#,
        )
        .bind(record.artwork_id.get())
        .bind(record.buyer_id.get())
        .bind(record.purchase_price)
        .bind(record.purchase_date)
        .bind(&record.transaction_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, ArtworkError::AlreadyPurchased))?;

        Ok(PurchaseId::new(id))
    }
}

/// Turn a unique-index violation into the matching business error;
/// everything else stays a Database error
fn map_unique_violation(e: sqlx::Error, business: ArtworkError) -> ArtworkError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => business,
        _ => ArtworkError::Database(e),
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct ArtworkRow {
    artwork_id: i64,
    owner_id: i64,
    file_name: String,
    content_type: String,
    file_size: i64,
    content_hash: String,
    perceptual_hash: Option<String>,
    image_path: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    is_listed_for_sale: bool,
    sale_price: Option<f64>,
}

impl ArtworkRow {
    fn into_artwork(self) -> ArtworkResult<Artwork> {
        let content_hash = ContentHash::parse(&self.content_hash).ok_or_else(|| {
            ArtworkError::Internal(format!(
                "malformed content hash in storage for artwork {}",
                self.artwork_id
            ))
        })?;
        Ok(Artwork {
            id: ArtworkId::new(self.artwork_id),
            owner_id: UserId::new(self.owner_id),
            file_name: self.file_name,
            content_type: self.content_type,
            file_size: self.file_size,
            content_hash,
            perceptual_hash: self.perceptual_hash,
            image_path: self.image_path,
            created_at: self.created_at,
            is_listed_for_sale: self.is_listed_for_sale,
            sale_price: self.sale_price,
        })
    }
}

#[derive(Clone, sqlx::FromRow)]
struct OwnerRow {
    user_id: i64,
    username: String,
    user_role: i16,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl OwnerRow {
    fn into_owner(self) -> OwnerSummary {
        OwnerSummary {
            id: UserId::new(self.user_id),
            username: self.username,
            role: UserRole::from_id(self.user_role).code().to_string(),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LedgerRecordRow {
    ledger_record_id: i64,
    artwork_id: i64,
    transaction_id: String,
    consensus_timestamp: chrono::DateTime<chrono::Utc>,
    memo: String,
    status: String,
    recorded_at: chrono::DateTime<chrono::Utc>,
}

impl LedgerRecordRow {
    fn into_record(self) -> LedgerRecord {
        LedgerRecord {
            id: LedgerRecordId::new(self.ledger_record_id),
            artwork_id: ArtworkId::new(self.artwork_id),
            transaction_id: self.transaction_id,
            consensus_timestamp: self.consensus_timestamp,
            memo: self.memo,
            status: self.status,
            recorded_at: self.recorded_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PurchaseRow {
    purchase_id: i64,
    artwork_id: i64,
    buyer_id: i64,
    purchase_price: f64,
    purchase_date: chrono::DateTime<chrono::Utc>,
    transaction_id: String,
}

impl PurchaseRow {
    fn into_record(self) -> PurchaseRecord {
        PurchaseRecord {
            id: PurchaseId::new(self.purchase_id),
            artwork_id: ArtworkId::new(self.artwork_id),
            buyer_id: UserId::new(self.buyer_id),
            purchase_price: self.purchase_price,
            purchase_date: self.purchase_date,
            transaction_id: self.transaction_id,
        }
    }
}
