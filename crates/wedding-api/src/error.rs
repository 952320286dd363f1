use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use wedding_db::DbError;
use wedding_types::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Store failures are already logged by `Store` itself.
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("upload storage failed: {0}")]
    Upload(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Db(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            Self::Db(_) | Self::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Multipart(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Upload(e) = &self {
            error!("Upload storage error: {}", e);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
