use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_record_id;
use super::{ApiError, ApiResponse, AppState, Notice};
use crate::services::AccountError;

/// DELETE /users/{id} (admin)
/// Remove a user account. Cafes the user authored stay in the directory
/// with their author reference cleared. An unknown id is reported as a
/// warning notice, not a hard error.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = validate_record_id(id)?;

    match state.accounts().delete_user(id).await {
        Ok(()) => Ok(Json(ApiResponse::with_notice(
            (),
            Notice::success("User deleted."),
        ))),
        Err(AccountError::NotFound(_)) => {
            Err(ApiError::MissingRecord("User not found.".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}
