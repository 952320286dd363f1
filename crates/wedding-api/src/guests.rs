use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::info;

use wedding_types::api::{CreateGuestResponse, GuestQuery, SuccessResponse};
use wedding_types::models::NewGuest;

use crate::AppState;
use crate::error::ApiError;

/// GET /api/guests: newest RSVP first, optionally filtered by `?search=`.
pub async fn list_guests(
    State(state): State<AppState>,
    Query(query): Query<GuestQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let guests = match query.search {
        Some(term) => state.store.search_guests(term).await?,
        None => state.store.get_guests().await?,
    };
    Ok(Json(guests))
}

pub async fn create_guest(
    State(state): State<AppState>,
    Json(req): Json<NewGuest>,
) -> Result<impl IntoResponse, ApiError> {
    let guest_id = state.store.add_guest(req).await?;
    info!("RSVP {} recorded", guest_id);
    Ok(Json(CreateGuestResponse {
        success: true,
        guest_id,
    }))
}

pub async fn delete_guest(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_guest(id).await?;
    Ok(Json(SuccessResponse::ok()))
}
