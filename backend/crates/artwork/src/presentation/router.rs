//! Artwork Router

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use auth::domain::repository::AuthSessionRepository;
use auth::presentation::middleware::{AuthMiddlewareState, require_auth_session};
use platform::cache::MemoryCache;

use crate::application::config::ArtworkConfig;
use crate::domain::ledger::Ledger;
use crate::domain::repository::ArtworkRepository;
use crate::domain::services::MAX_UPLOAD_BYTES;
use crate::infra::images::ImageStore;
use crate::infra::ledger::SimulatedLedger;
use crate::infra::postgres::PgArtworkRepository;
use crate::presentation::handlers::{self, ArtworkAppState};

/// Create the artwork router with the PostgreSQL repository and the
/// simulated ledger
pub fn artwork_router<S>(
    repo: PgArtworkRepository,
    ledger: SimulatedLedger,
    images: Arc<ImageStore>,
    cache: Arc<MemoryCache>,
    config: ArtworkConfig,
    auth: AuthMiddlewareState<S>,
) -> Router
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    artwork_router_generic(repo, ledger, images, cache, config, auth)
}

/// Create a generic artwork router for any repository/ledger implementation
pub fn artwork_router_generic<R, L, S>(
    repo: R,
    ledger: L,
    images: Arc<ImageStore>,
    cache: Arc<MemoryCache>,
    config: ArtworkConfig,
    auth: AuthMiddlewareState<S>,
) -> Router
where
    R: ArtworkRepository + Clone + Send + Sync + 'static,
    L: Ledger + Clone + Send + Sync + 'static,
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let state = ArtworkAppState {
        repo: Arc::new(repo),
        ledger: Arc::new(ledger),
        images,
        cache,
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/upload", post(handlers::upload::<R, L>))
        .route("/user", get(handlers::user_artworks::<R, L>))
        .route("/purchased", get(handlers::purchased_artworks::<R, L>))
        .route("/seller-stats", get(handlers::seller_stats::<R, L>))
        .route("/{id}/list", post(handlers::list_for_sale::<R, L>))
        .route("/{id}/purchase", post(handlers::purchase::<R, L>))
        .route("/{id}/download", get(handlers::download::<R, L>))
        .layer(axum::middleware::from_fn(move |req, next| {
            let auth = auth.clone();
            require_auth_session(auth, req, next)
        }));

    let public = Router::new()
        .route("/verify", post(handlers::verify::<R, L>))
        .route("/marketplace", get(handlers::marketplace::<R, L>))
        .route(
            "/image/{artwork_id}/{file_name}",
            get(handlers::serve_image::<R, L>),
        )
        .route(
            "/image/{artwork_id}/{file_name}/exists",
            get(handlers::image_exists::<R, L>),
        );

    protected
        .merge(public)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
