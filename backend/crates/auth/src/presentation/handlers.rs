//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::client::{extract_client_ip, extract_fingerprint};

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, SignInUseCase, SignOutUseCase, SignUpUseCase,
    sign_in::SignInInput, sign_up::SignUpInput,
};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, RegisterRequest, SessionStatusResponse, UserDto,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
///
/// Creates the account and opens a session in one step.
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        user_name: req.username,
        email: req.email,
        password: req.password,
        role: req.role,
    };

    let output = use_case.execute(input, fingerprint.hash_vec()).await?;

    let cookie = platform::cookie::set_cookie_header(&state.config.cookie(), &output.session_token);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            user: UserDto::from_user(&output.user),
            expires_at_ms: output.expires_at_ms,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input, fingerprint.hash_vec()).await?;

    let cookie = platform::cookie::set_cookie_header(&state.config.cookie(), &output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            user: UserDto::from_user(&output.user),
            expires_at_ms: output.expires_at_ms,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = state.config.cookie().build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session = if let Some(token) = token {
        use_case.get_session(&token, &fingerprint.hash).await.ok()
    } else {
        None
    };

    match session {
        Some(session) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            user_id: Some(session.user_id.get()),
            user_role: Some(session.user_role.code().to_string()),
            expires_at_ms: Some(session.expires_at_ms),
        })),
        None => Ok(Json(SessionStatusResponse::anonymous())),
    }
}
