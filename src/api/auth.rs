use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::{validate_email, validate_password, validate_username};
use super::{ApiError, ApiResponse, AppState, Notice, UserDto};
use crate::models::user::UserAccount;

/// Session key holding the authenticated user's id.
const SESSION_USER_KEY: &str = "user_id";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Optional admin-promotion code, matched against the configured token.
    #[serde(default)]
    pub secret_code: Option<String>,
}

// ============================================================================
// Middleware
// ============================================================================

/// Admin gate for mutation routes: resolves the session identity and
/// short-circuits with a warning notice unless the account's role is
/// admin. The wrapped handler never runs for anyone else.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    match current_identity(&state, &session).await? {
        Some(user) if user.is_admin() => {
            tracing::Span::current().record("user_id", user.id);
            Ok(next.run(request).await)
        }
        _ => Err(ApiError::Forbidden("Only admins allowed.".to_string())),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Create an account and establish a session for the new identity.
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let username = validate_username(&payload.username)?;
    let email = validate_email(&payload.email)?;
    let password = validate_password(&payload.password)?;

    let user = state.accounts().register(username, email, password).await?;

    establish_session(&session, &user).await?;

    let notice = Notice::success(format!("Welcome, {}!", user.username));
    Ok(Json(ApiResponse::with_notice(UserDto::from(user), notice)))
}

/// POST /auth/login
/// Verify credentials and establish a session. A matching secret code
/// promotes the account to admin before the session is created.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let outcome = state
        .accounts()
        .login(
            &payload.email,
            &payload.password,
            payload.secret_code.as_deref(),
        )
        .await?;

    establish_session(&session, &outcome.user).await?;

    let response = if outcome.promoted {
        ApiResponse::with_notice(
            UserDto::from(outcome.user),
            Notice::info("Admin access granted!"),
        )
    } else {
        ApiResponse::success(UserDto::from(outcome.user))
    };

    Ok(Json(response))
}

/// POST /auth/logout
/// Clear the current session. Calling without one is a no-op.
pub async fn logout(session: Session) -> Json<ApiResponse<()>> {
    let _ = session.flush().await;
    Json(ApiResponse::success(()))
}

/// GET /auth/me
/// The identity behind the current session.
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = current_identity(&state, &session)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve the session to a user, or None for anonymous callers. A
/// session pointing at a since-deleted user also resolves to None.
pub async fn current_identity(
    state: &Arc<AppState>,
    session: &Session,
) -> Result<Option<UserAccount>, ApiError> {
    let user_id: Option<i32> = session
        .get(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let user = state
        .store()
        .get_user_by_id(user_id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to load session user: {e}")))?;

    Ok(user)
}

async fn establish_session(session: &Session, user: &UserAccount) -> Result<(), ApiError> {
    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}
