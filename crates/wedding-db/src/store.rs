use std::sync::Arc;

use tracing::error;

use wedding_types::OrderNum;
use wedding_types::models::{Guest, LikeExportRow, LikeStats, NewGuest, Photo, PhotoUpdate};

use crate::{Database, DbError, Result};

/// Async handle over [`Database`]. Each call runs its statement on the
/// blocking pool so request tasks suspend instead of stalling the runtime.
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl Store {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn run<F, T>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        let result = tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error in {}: {}", op, e);
                DbError::Task(e.to_string())
            })?;

        if let Err(e) = &result {
            if !e.is_validation() {
                error!("{} failed: {}", op, e);
            }
        }
        result
    }

    // -- Photos --

    pub async fn add_photo(
        &self,
        url: String,
        description: Option<String>,
        order_num: OrderNum,
    ) -> Result<i64> {
        self.run("add_photo", move |db| {
            db.add_photo(&url, description.as_deref(), order_num)
        })
        .await
    }

    pub async fn get_photos(&self) -> Result<Vec<Photo>> {
        self.run("get_photos", |db| db.get_photos()).await
    }

    pub async fn update_photo(
        &self,
        id: i64,
        description: Option<String>,
        order_num: OrderNum,
    ) -> Result<PhotoUpdate> {
        self.run("update_photo", move |db| {
            db.update_photo(id, description.as_deref(), order_num)
        })
        .await
    }

    pub async fn delete_photo(&self, id: i64) -> Result<()> {
        self.run("delete_photo", move |db| db.delete_photo(id)).await
    }

    // -- Guests --

    pub async fn add_guest(&self, guest: NewGuest) -> Result<i64> {
        self.run("add_guest", move |db| db.add_guest(&guest)).await
    }

    pub async fn get_guests(&self) -> Result<Vec<Guest>> {
        self.run("get_guests", |db| db.get_guests()).await
    }

    pub async fn search_guests(&self, term: String) -> Result<Vec<Guest>> {
        self.run("search_guests", move |db| db.search_guests(&term))
            .await
    }

    pub async fn delete_guest(&self, id: i64) -> Result<()> {
        self.run("delete_guest", move |db| db.delete_guest(id)).await
    }

    // -- Likes --

    pub async fn add_like(&self, ip: String) -> Result<i64> {
        self.run("add_like", move |db| db.add_like(&ip)).await
    }

    pub async fn get_like_count(&self) -> Result<i64> {
        self.run("get_like_count", |db| db.get_like_count()).await
    }

    pub async fn like_stats(&self) -> Result<LikeStats> {
        self.run("like_stats", |db| db.like_stats()).await
    }

    pub async fn get_likes_for_export(&self) -> Result<Vec<LikeExportRow>> {
        self.run("get_likes_for_export", |db| db.get_likes_for_export())
            .await
    }
}
