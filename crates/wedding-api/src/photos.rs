use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{HeaderMap, header},
    response::IntoResponse,
};
use tracing::{debug, info, warn};

use wedding_types::OrderNum;
use wedding_types::api::{
    CreatePhotoResponse, NewPhotoRequest, SuccessResponse, UpdatePhotoRequest, UpdatePhotoResponse,
};

use crate::AppState;
use crate::error::ApiError;

/// A photo submission after the body has been read, whichever form it came in.
#[derive(Default)]
struct PhotoSubmission {
    /// Original filename and bytes of the `photo` part.
    upload: Option<(Option<String>, Bytes)>,
    url: Option<String>,
    description: Option<String>,
    order_num: OrderNum,
}

/// POST /api/photos: multipart with an optional `photo` file part, or JSON
/// `{ url, description, orderNum }`. An uploaded file wins over `url`.
pub async fn create_photo(
    State(state): State<AppState>,
    request: Request,
) -> Result<impl IntoResponse, ApiError> {
    let submission = if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        read_multipart(multipart).await?
    } else {
        let Json(body) = Json::<NewPhotoRequest>::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        PhotoSubmission {
            upload: None,
            url: body.url,
            description: body.description,
            order_num: body.order_num,
        }
    };

    let (url, stored_upload) = match submission.upload {
        Some((file_name, data)) => (state.uploads.save(file_name.as_deref(), &data).await?, true),
        None => (submission.url.unwrap_or_default(), false),
    };

    let photo_id = match state
        .store
        .add_photo(url.clone(), submission.description, submission.order_num)
        .await
    {
        Ok(id) => id,
        Err(e) => {
            if stored_upload {
                // the file stays on disk; nothing references it
                warn!("Photo insert failed after upload, orphaned file {}", url);
            }
            return Err(e.into());
        }
    };

    info!("Photo {} saved: {}", photo_id, url);
    let photos = state.store.get_photos().await?;

    Ok(Json(CreatePhotoResponse {
        success: true,
        photo_id,
        url,
        photos,
    }))
}

pub async fn list_photos(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let photos = state.store.get_photos().await?;
    Ok(Json(photos))
}

pub async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePhotoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let photo = state
        .store
        .update_photo(id, req.description, req.order_num)
        .await?;
    Ok(Json(UpdatePhotoResponse {
        success: true,
        photo,
    }))
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_photo(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

async fn read_multipart(mut multipart: Multipart) -> Result<PhotoSubmission, ApiError> {
    let mut submission = PhotoSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "photo" => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await?;
                if !data.is_empty() {
                    submission.upload = Some((file_name, data));
                }
            }
            "url" => submission.url = Some(field.text().await?),
            "description" => submission.description = Some(field.text().await?),
            "orderNum" => submission.order_num = OrderNum::parse(&field.text().await?),
            other => debug!("Ignoring multipart field '{}'", other),
        }
    }

    Ok(submission)
}
