use axum::{Json, extract::State, http::header, response::IntoResponse};
use tracing::info;

use wedding_db::export::{EXPORT_CONTENT_TYPE, EXPORT_FILENAME, to_delimited_text};
use wedding_types::api::{LikeCountResponse, LikeResponse};

use crate::AppState;
use crate::client_ip::ClientIp;
use crate::error::ApiError;

/// POST /api/likes: records one like and answers with fresh stats.
pub async fn add_like(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
) -> Result<impl IntoResponse, ApiError> {
    let like_id = state.store.add_like(ip.clone()).await?;
    info!("Like {} from {}", like_id, ip);

    let stats = state.store.like_stats().await?;
    Ok(Json(LikeResponse {
        success: true,
        stats,
    }))
}

pub async fn like_count(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let count = state.store.get_like_count().await?;
    Ok(Json(LikeCountResponse { count }))
}

pub async fn like_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.like_stats().await?))
}

/// GET /api/likes/export: every like as a CSV attachment.
pub async fn export_likes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state.store.get_likes_for_export().await?;
    // formatting is in-memory work, fine on the async thread
    let csv = to_delimited_text(&rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", EXPORT_FILENAME),
            ),
        ],
        csv,
    ))
}
