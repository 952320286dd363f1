use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub url: String,
    pub description: Option<String>,
    pub order_num: i64,
    /// `None` for rows created before the column existed.
    pub created_at: Option<String>,
}

/// What `update_photo` reports back: the values that were requested, whether
/// or not a row matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUpdate {
    pub id: i64,
    pub description: Option<String>,
    pub order_num: i64,
}

/// Guest rows are served with their column names as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub message: Option<String>,
    pub attendance: String,
    pub created_at: Option<String>,
}

/// RSVP submission. Fields are optional here so a missing field is reported
/// as a validation error by the store instead of a body parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewGuest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub attendance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeExportRow {
    pub id: i64,
    pub ip: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStats {
    pub total_likes: i64,
    pub today_likes: i64,
    pub weekly_likes: i64,
    /// Oldest date first.
    pub trend: Vec<TrendPoint>,
}
