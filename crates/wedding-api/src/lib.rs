pub mod client_ip;
pub mod error;
pub mod guests;
pub mod likes;
pub mod photos;
pub mod uploads;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use wedding_db::Store;

use crate::uploads::UploadStorage;

/// 20 MB request body limit, sized for phone camera photos.
pub const MAX_UPLOAD_SIZE: usize = 20 * 1024 * 1024;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub uploads: UploadStorage,
}

/// All API routes plus static serving of uploaded photos under `/uploads`.
pub fn router(state: AppState) -> Router {
    let upload_dir = ServeDir::new(state.uploads.dir());

    Router::new()
        .route("/api/photos", get(photos::list_photos).post(photos::create_photo))
        .route("/api/photos/{id}", put(photos::update_photo).delete(photos::delete_photo))
        .route("/api/guests", get(guests::list_guests).post(guests::create_guest))
        .route("/api/guests/{id}", delete(guests::delete_guest))
        .route("/api/likes", post(likes::add_like))
        .route("/api/likes/count", get(likes::like_count))
        .route("/api/likes/stats", get(likes::like_stats))
        .route("/api/likes/export", get(likes::export_likes))
        .route("/health", get(health))
        .nest_service("/uploads", upload_dir)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
