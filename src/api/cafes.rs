use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::{validate_cafe_name, validate_location, validate_price, validate_record_id};
use super::{ApiError, ApiResponse, AppState, CafeDto, Notice};
use crate::models::cafe::NewCafe;
use crate::services::DirectoryError;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct SearchRequest {
    pub location: String,
}

#[derive(Deserialize)]
pub struct AddCafeRequest {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    #[serde(default)]
    pub has_toilet: bool,
    #[serde(default)]
    pub has_wifi: bool,
    #[serde(default)]
    pub has_sockets: bool,
    #[serde(default)]
    pub can_take_calls: bool,
    #[serde(default)]
    pub coffee_price: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePriceRequest {
    pub new_price: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /cafes
/// The full directory. An empty directory is not an error; it carries an
/// info notice instead so the caller can render an empty state.
pub async fn list_cafes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CafeDto>>>, ApiError> {
    let cafes = state.directory().list_all().await?;

    let dtos: Vec<CafeDto> = cafes.into_iter().map(CafeDto::from).collect();

    let response = if dtos.is_empty() {
        ApiResponse::with_notice(dtos, Notice::info("Sorry, no cafes found."))
    } else {
        ApiResponse::success(dtos)
    };

    Ok(Json(response))
}

/// GET /cafes/{id}
/// Single cafe detail; standard 404 when absent.
pub async fn get_cafe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CafeDto>>, ApiError> {
    let id = validate_record_id(id)?;

    let cafe = state
        .directory()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::cafe_not_found(id))?;

    Ok(Json(ApiResponse::success(CafeDto::from(cafe))))
}

/// GET /cafes/random
/// One cafe chosen uniformly at random, or an empty-directory notice.
pub async fn random_cafe(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CafeDto>>, ApiError> {
    let cafe = state.directory().random_one().await?;

    Ok(Json(ApiResponse::success(CafeDto::from(cafe))))
}

/// POST /cafes/search
/// Exact-match location search. An empty result is a success with a
/// formatted notice quoting the query, never an error.
pub async fn search_cafes(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Vec<CafeDto>>>, ApiError> {
    let location = validate_location(&payload.location)?;

    let cafes = state.directory().search_by_location(location).await?;

    let dtos: Vec<CafeDto> = cafes.into_iter().map(CafeDto::from).collect();

    let response = if dtos.is_empty() {
        let notice = Notice::info(format!("Sorry, we don't have cafes in '{}'.", location));
        ApiResponse::with_notice(dtos, notice)
    } else {
        ApiResponse::success(dtos)
    };

    Ok(Json(response))
}

/// POST /cafes (admin)
/// Add a cafe authored by the acting admin; returns the created record
/// so the caller can navigate to its detail view.
pub async fn add_cafe(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<AddCafeRequest>,
) -> Result<Json<ApiResponse<CafeDto>>, ApiError> {
    let name = validate_cafe_name(&payload.name)?;
    let location = validate_location(&payload.location)?;

    // The admin gate already ran; resolve the identity again for the
    // author attribution.
    let author = super::auth::current_identity(&state, &session)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let new_cafe = NewCafe {
        name: name.to_string(),
        map_url: payload.map_url,
        img_url: payload.img_url,
        location: location.to_string(),
        seats: payload.seats,
        has_toilet: payload.has_toilet,
        has_wifi: payload.has_wifi,
        has_sockets: payload.has_sockets,
        can_take_calls: payload.can_take_calls,
        coffee_price: payload.coffee_price,
    };

    let created = state.directory().add_cafe(new_cafe, author.id).await?;

    Ok(Json(ApiResponse::success(CafeDto::from(created))))
}

/// PUT/PATCH /cafes/{id}/price (admin)
/// Overwrite the coffee price; standard 404 for an unknown id.
pub async fn update_price(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePriceRequest>,
) -> Result<Json<ApiResponse<CafeDto>>, ApiError> {
    let id = validate_record_id(id)?;
    let new_price = validate_price(&payload.new_price)?;

    let updated = state.directory().update_price(id, new_price).await?;

    let notice = Notice::success(format!(
        "Price updated to {}.",
        updated.coffee_price.as_deref().unwrap_or(new_price)
    ));

    Ok(Json(ApiResponse::with_notice(CafeDto::from(updated), notice)))
}

/// DELETE /cafes/{id} (admin)
/// Remove a cafe. An unknown id is reported as a warning notice, not a
/// hard error.
pub async fn delete_cafe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = validate_record_id(id)?;

    match state.directory().delete_cafe(id).await {
        Ok(()) => Ok(Json(ApiResponse::with_notice(
            (),
            Notice::success("Cafe deleted."),
        ))),
        Err(DirectoryError::NotFound(_)) => {
            Err(ApiError::MissingRecord("Cafe not found.".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}
