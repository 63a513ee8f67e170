use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SystemStatus};

/// GET /system/status (admin)
/// Version, uptime, and record counts. Uptime is computed from the
/// state's start instant rather than process-global time.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let cafes = state
        .store()
        .count_cafes()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to count cafes: {e}")))?;

    let users = state
        .store()
        .count_users()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to count users: {e}")))?;

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        cafes,
        users,
    })))
}
