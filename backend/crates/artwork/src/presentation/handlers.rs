//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use auth::CurrentUser;
use platform::cache::MemoryCache;

use crate::application::config::{ArtworkConfig, cache_keys};
use crate::application::download::DownloadArtworkUseCase;
use crate::application::listing::ListForSaleUseCase;
use crate::application::purchase::PurchaseArtworkUseCase;
use crate::application::queries::ArtworkQueries;
use crate::application::seller_stats::SellerStatsUseCase;
use crate::application::upload::{UploadArtworkUseCase, UploadInput};
use crate::application::verify::{VerifyArtworkUseCase, VerifyInput};
use crate::domain::services::content_type_for;
use crate::domain::ledger::Ledger;
use crate::domain::repository::ArtworkRepository;
use crate::error::{ArtworkError, ArtworkResult};
use crate::infra::images::ImageStore;
use crate::presentation::dto::{
    ArtworkDto, ImageExistsResponse, ListForSaleRequest, PurchaseResultDto, SellerStatsDto,
    UploadResponse, VerificationResultDto,
};
use kernel::id::ArtworkId;

/// Shared state for artwork handlers
#[derive(Clone)]
pub struct ArtworkAppState<R, L>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub ledger: Arc<L>,
    pub images: Arc<ImageStore>,
    pub cache: Arc<MemoryCache>,
    pub config: Arc<ArtworkConfig>,
}

fn require_seller(current: &CurrentUser) -> ArtworkResult<()> {
    if !current.role.is_seller() {
        return Err(ArtworkError::Forbidden(
            "Only sellers can perform this action".to_string(),
        ));
    }
    Ok(())
}

fn require_buyer(current: &CurrentUser) -> ArtworkResult<()> {
    if !current.role.is_buyer() {
        return Err(ArtworkError::Forbidden(
            "Only buyers can purchase artworks".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Upload
// ============================================================================

/// POST /api/artworks/upload (multipart: `file`, optional `useLedger`)
///
/// Any authenticated user may register artwork; only listing and
/// seller statistics are restricted to the Seller role.
pub async fn upload<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> ArtworkResult<impl IntoResponse>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    let mut file_name = None;
    let mut content_type = None;
    let mut bytes = None;
    let mut use_ledger = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ArtworkError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                content_type = field.content_type().map(str::to_string);
                bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ArtworkError::Validation(format!("Failed to read file: {e}")))?
                        .to_vec(),
                );
            }
            Some("useLedger") | Some("useBlockchain") => {
                let value = field.text().await.unwrap_or_default();
                use_ledger = value.trim().eq_ignore_ascii_case("true");
            }
            _ => {}
        }
    }

    let bytes = bytes.ok_or_else(|| ArtworkError::Validation("No file uploaded".to_string()))?;
    let file_name = file_name.unwrap_or_else(|| "artwork".to_string());
    let content_type = content_type.unwrap_or_else(|| content_type_for(&file_name).to_string());

    let use_case = UploadArtworkUseCase::new(
        state.repo.clone(),
        state.ledger.clone(),
        state.images.clone(),
        state.cache.clone(),
    );

    let output = use_case
        .execute(UploadInput {
            owner_id: current.user_id,
            file_name,
            content_type,
            bytes,
            use_ledger,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Artwork uploaded and registered successfully".to_string(),
            artwork: ArtworkDto::from_details(&output.details, &state.images),
            transaction_id: output.transaction_id,
        }),
    ))
}

// ============================================================================
// Verification
// ============================================================================

/// POST /api/artworks/verify (multipart: `fileHash`, `transactionId` or `file`)
pub async fn verify<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    mut multipart: Multipart,
) -> ArtworkResult<Json<VerificationResultDto>>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    let mut input = VerifyInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ArtworkError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("fileHash") => input.file_hash = field.text().await.ok(),
            Some("transactionId") => input.transaction_id = field.text().await.ok(),
            Some("file") => {
                input.file_bytes = field.bytes().await.ok().map(|b| b.to_vec());
            }
            _ => {}
        }
    }

    // Hash/transaction lookups are cacheable; raw file submissions are not
    let cache_key = if input.file_bytes.as_deref().is_none_or(<[u8]>::is_empty) {
        Some(cache_keys::verify(
            input.file_hash.as_deref().unwrap_or(""),
            input.transaction_id.as_deref().unwrap_or(""),
        ))
    } else {
        None
    };

    if let Some(key) = &cache_key {
        if let Some(cached) = state.cache.get_json::<VerificationResultDto>(key) {
            return Ok(Json(cached));
        }
    }

    let use_case = VerifyArtworkUseCase::new(state.repo.clone());
    let output = use_case.execute(input).await?;

    let result = VerificationResultDto {
        is_verified: output.is_verified,
        message: output.message,
        artwork: output
            .details
            .as_ref()
            .map(|d| ArtworkDto::from_details(d, &state.images)),
    };

    if let Some(key) = cache_key {
        state.cache.set_json(key, &result, state.config.verify_ttl);
    }

    Ok(Json(result))
}

// ============================================================================
// Collections
// ============================================================================

/// GET /api/artworks/user
pub async fn user_artworks<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    Extension(current): Extension<CurrentUser>,
) -> ArtworkResult<Json<Vec<ArtworkDto>>>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    let cache_key = cache_keys::user_artworks(current.user_id);
    if let Some(cached) = state.cache.get_json::<Vec<ArtworkDto>>(&cache_key) {
        return Ok(Json(cached));
    }

    let queries = ArtworkQueries::new(state.repo.clone());
    let details = queries.user_artworks(current.user_id).await?;
    let dtos = ArtworkDto::list_from_details(&details, &state.images);

    state
        .cache
        .set_json(cache_key, &dtos, state.config.user_artworks_ttl);
    Ok(Json(dtos))
}

/// GET /api/artworks/purchased
pub async fn purchased_artworks<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    Extension(current): Extension<CurrentUser>,
) -> ArtworkResult<Json<Vec<ArtworkDto>>>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    let cache_key = cache_keys::purchased_artworks(current.user_id);
    if let Some(cached) = state.cache.get_json::<Vec<ArtworkDto>>(&cache_key) {
        return Ok(Json(cached));
    }

    let queries = ArtworkQueries::new(state.repo.clone());
    let details = queries.purchased_artworks(current.user_id).await?;
    let dtos = ArtworkDto::list_from_details(&details, &state.images);

    state
        .cache
        .set_json(cache_key, &dtos, state.config.purchased_artworks_ttl);
    Ok(Json(dtos))
}

/// GET /api/artworks/marketplace
pub async fn marketplace<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
) -> ArtworkResult<Json<Vec<ArtworkDto>>>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    if let Some(cached) = state.cache.get_json::<Vec<ArtworkDto>>(cache_keys::MARKETPLACE) {
        return Ok(Json(cached));
    }

    let queries = ArtworkQueries::new(state.repo.clone());
    let details = queries.marketplace().await?;
    let dtos = ArtworkDto::list_from_details(&details, &state.images);

    state
        .cache
        .set_json(cache_keys::MARKETPLACE, &dtos, state.config.marketplace_ttl);
    Ok(Json(dtos))
}

// ============================================================================
// Marketplace actions
// ============================================================================

/// POST /api/artworks/{id}/list
pub async fn list_for_sale<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    Extension(current): Extension<CurrentUser>,
    Path(artwork_id): Path<i64>,
    Json(req): Json<ListForSaleRequest>,
) -> ArtworkResult<Json<ArtworkDto>>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    require_seller(&current)?;

    let use_case = ListForSaleUseCase::new(state.repo.clone(), state.cache.clone());
    let details = use_case
        .execute(ArtworkId::new(artwork_id), req.price, current.user_id)
        .await?;

    Ok(Json(ArtworkDto::from_details(&details, &state.images)))
}

/// POST /api/artworks/{id}/purchase
pub async fn purchase<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    Extension(current): Extension<CurrentUser>,
    Path(artwork_id): Path<i64>,
) -> ArtworkResult<Json<PurchaseResultDto>>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    require_buyer(&current)?;

    let use_case = PurchaseArtworkUseCase::new(
        state.repo.clone(),
        state.ledger.clone(),
        state.cache.clone(),
        state.config.clone(),
    );
    let output = use_case
        .execute(ArtworkId::new(artwork_id), current.user_id)
        .await?;

    Ok(Json(PurchaseResultDto {
        success: true,
        message: "Artwork purchased successfully!".to_string(),
        artwork: ArtworkDto::from_details(&output.details, &state.images),
        transaction_id: output.transaction_id,
        amount: output.amount,
    }))
}

/// GET /api/artworks/seller-stats
pub async fn seller_stats<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    Extension(current): Extension<CurrentUser>,
) -> ArtworkResult<Json<SellerStatsDto>>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    require_seller(&current)?;

    let use_case = SellerStatsUseCase::new(
        state.repo.clone(),
        state.cache.clone(),
        state.config.clone(),
    );
    let stats = use_case.execute(current.user_id).await?;

    Ok(Json(SellerStatsDto::from(stats)))
}

// ============================================================================
// Files
// ============================================================================

/// GET /api/artworks/{id}/download
pub async fn download<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    Extension(current): Extension<CurrentUser>,
    Path(artwork_id): Path<i64>,
) -> ArtworkResult<impl IntoResponse>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    let use_case = DownloadArtworkUseCase::new(state.repo.clone());
    let info = use_case
        .execute(ArtworkId::new(artwork_id), current.user_id)
        .await?
        .ok_or(ArtworkError::NotFound)?;

    let image_path = info.image_path.ok_or(ArtworkError::NotFound)?;
    let bytes = state
        .images
        .image_bytes(&image_path)
        .await
        .ok_or(ArtworkError::NotFound)?;

    let download_name = download_file_name(&info.file_name, &image_path);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, info.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{download_name}\""),
            ),
        ],
        bytes,
    ))
}

/// GET /api/artworks/image/{artwork_id}/{file_name}
pub async fn serve_image<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    Path((artwork_id, file_name)): Path<(i64, String)>,
) -> ArtworkResult<impl IntoResponse>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    let image_path = stored_image_path(artwork_id, &file_name);

    let cache_key = cache_keys::image(&image_path);
    let bytes = match state.cache.get(&cache_key) {
        Some(bytes) => bytes,
        None => {
            let bytes = state
                .images
                .image_bytes(&image_path)
                .await
                .ok_or(ArtworkError::NotFound)?;
            state
                .cache
                .set(cache_key, bytes.clone(), state.config.public_image_ttl);
            bytes
        }
    };

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for(&file_name).to_string())],
        bytes,
    ))
}

/// GET /api/artworks/image/{artwork_id}/{file_name}/exists
pub async fn image_exists<R, L>(
    State(state): State<ArtworkAppState<R, L>>,
    Path((artwork_id, file_name)): Path<(i64, String)>,
) -> ArtworkResult<Json<ImageExistsResponse>>
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
{
    let image_path = stored_image_path(artwork_id, &file_name);

    let cache_key = cache_keys::image_exists(&image_path);
    if let Some(cached) = state.cache.get_json::<ImageExistsResponse>(&cache_key) {
        return Ok(Json(cached));
    }

    let response = ImageExistsResponse {
        exists: state.images.exists(&image_path).await,
    };
    state
        .cache
        .set_json(cache_key, &response, state.config.image_exists_ttl);

    Ok(Json(response))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn stored_image_path(artwork_id: i64, file_name: &str) -> String {
    format!("images/artworks/{artwork_id}/{file_name}")
}

/// Download as the original name's stem with the stored file's extension
fn download_file_name(original_name: &str, image_path: &str) -> String {
    let stem = std::path::Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("artwork");
    match std::path::Path::new(image_path)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}
