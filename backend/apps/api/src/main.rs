//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use artwork::{ArtworkConfig, ImageStore, PgArtworkRepository, SimulatedLedger, artwork_router};
use auth::domain::repository::AuthSessionRepository;
use auth::presentation::middleware::AuthMiddlewareState;
use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use platform::cache::MemoryCache;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Decode the base64 session secret into the 32-byte HMAC key,
/// rejecting values of the wrong length instead of panicking
fn load_session_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = Engine::decode(&general_purpose::STANDARD, secret_b64)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("AUTH_SESSION_SECRET must decode to 32 bytes, got {len}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,artwork=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired auth sessions
    // Errors here should not prevent server startup
    let auth_store_for_cleanup = PgAuthRepository::new(pool.clone());
    match auth_store_for_cleanup.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(
                sessions_deleted = sessions,
                "Auth session cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Auth session cleanup failed, continuing anyway"
            );
        }
    }

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("AUTH_SESSION_SECRET").expect("AUTH_SESSION_SECRET must be set in production");
        AuthConfig {
            session_secret: load_session_secret(&secret_b64)?,
            ..AuthConfig::default()
        }
    };

    // Artwork stack: image storage, simulated ledger, in-process cache
    let base_url =
        env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:26514".to_string());
    let storage_root = env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage".to_string());

    let images = Arc::new(ImageStore::new(storage_root, base_url));
    let ledger = SimulatedLedger::default();
    let cache = Arc::new(MemoryCache::new());
    let artwork_config = ArtworkConfig::default();

    // Periodically drop expired cache entries so stale keys do not
    // accumulate between reads
    let cache_for_sweep = Arc::clone(&cache);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            interval.tick().await;
            let removed = cache_for_sweep.sweep();
            if removed > 0 {
                tracing::debug!(entries_removed = removed, "Cache sweep completed");
            }
        }
    });

    let auth_repo = PgAuthRepository::new(pool.clone());
    let artwork_repo = PgArtworkRepository::new(pool.clone());

    let auth_middleware = AuthMiddlewareState {
        repo: Arc::new(auth_repo.clone()),
        config: Arc::new(auth_config.clone()),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(auth_repo, auth_config))
        .nest(
            "/api/artworks",
            artwork_router(
                artwork_repo,
                ledger,
                images,
                cache,
                artwork_config,
                auth_middleware,
            ),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(26514);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_secret_of_exactly_32_bytes_decodes() {
        let encoded = Engine::encode(&general_purpose::STANDARD, [7u8; 32]);
        let secret = load_session_secret(&encoded).unwrap();
        assert_eq!(secret, [7u8; 32]);
    }

    #[test]
    fn session_secret_of_the_wrong_length_is_an_error() {
        let encoded = Engine::encode(&general_purpose::STANDARD, [7u8; 16]);
        let err = load_session_secret(&encoded).unwrap_err();
        assert!(err.to_string().contains("32 bytes, got 16"));
    }

    #[test]
    fn session_secret_that_is_not_base64_is_an_error() {
        assert!(load_session_secret("not base64!!!").is_err());
    }
}
