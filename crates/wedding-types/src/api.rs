use serde::{Deserialize, Serialize};

use crate::OrderNum;
use crate::models::{LikeStats, Photo, PhotoUpdate};

// -- Photos --

/// JSON form of a photo submission, for clients linking an external image
/// instead of uploading one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhotoRequest {
    pub url: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub order_num: OrderNum,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhotoRequest {
    pub description: Option<String>,
    #[serde(default)]
    pub order_num: OrderNum,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhotoResponse {
    pub success: bool,
    pub photo_id: i64,
    pub url: String,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePhotoResponse {
    pub success: bool,
    pub photo: PhotoUpdate,
}

// -- Guests --

#[derive(Debug, Default, Deserialize)]
pub struct GuestQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestResponse {
    pub success: bool,
    pub guest_id: i64,
}

// -- Likes --

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub stats: LikeStats,
}

#[derive(Debug, Serialize)]
pub struct LikeCountResponse {
    pub count: i64,
}

// -- Shared --

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
