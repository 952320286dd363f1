use chrono::NaiveDateTime;
use rusqlite::{Connection, Row, params};
use tracing::debug;

use wedding_types::OrderNum;
use wedding_types::models::{Guest, LikeExportRow, NewGuest, Photo, PhotoUpdate};

use crate::{Database, DbError, Result, format_timestamp, local_now};

impl Database {
    // -- Photos --

    pub fn add_photo(
        &self,
        url: &str,
        description: Option<&str>,
        order_num: OrderNum,
    ) -> Result<i64> {
        if url.trim().is_empty() {
            return Err(DbError::validation("photo url or file is required"));
        }

        let now = format_timestamp(local_now());
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO photos (url, description, order_num, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![url, description, order_num.get(), now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_photos(&self) -> Result<Vec<Photo>> {
        self.with_conn(query_photos)
    }

    /// Missing ids are not an error: nothing is written and the requested
    /// values are still echoed.
    pub fn update_photo(
        &self,
        id: i64,
        description: Option<&str>,
        order_num: OrderNum,
    ) -> Result<PhotoUpdate> {
        let changed = self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE photos SET description = ?1, order_num = ?2 WHERE id = ?3",
                params![description, order_num.get(), id],
            )?)
        })?;
        if changed == 0 {
            debug!("update_photo: no photo with id {}", id);
        }

        Ok(PhotoUpdate {
            id,
            description: description.map(str::to_string),
            order_num: order_num.get(),
        })
    }

    pub fn delete_photo(&self, id: i64) -> Result<()> {
        let changed = self.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM photos WHERE id = ?1", [id])?)
        })?;
        if changed == 0 {
            debug!("delete_photo: no photo with id {}", id);
        }
        Ok(())
    }

    // -- Guests --

    pub fn add_guest(&self, guest: &NewGuest) -> Result<i64> {
        let name = required("name", &guest.name)?;
        let phone = required("phone", &guest.phone)?;
        let attendance = required("attendance", &guest.attendance)?;

        let now = format_timestamp(local_now());
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO guests (name, phone, message, attendance, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![name, phone, guest.message, attendance, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_guests(&self) -> Result<Vec<Guest>> {
        self.with_conn(|conn| query_guests(conn, None))
    }

    /// Case-insensitive substring match on name or phone.
    pub fn search_guests(&self, term: &str) -> Result<Vec<Guest>> {
        let term = term.trim();
        if term.is_empty() {
            return self.get_guests();
        }
        let pattern = like_pattern(term);
        self.with_conn(|conn| query_guests(conn, Some(&pattern)))
    }

    pub fn delete_guest(&self, id: i64) -> Result<()> {
        let changed = self.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM guests WHERE id = ?1", [id])?)
        })?;
        if changed == 0 {
            debug!("delete_guest: no guest with id {}", id);
        }
        Ok(())
    }

    // -- Likes --

    pub fn add_like(&self, ip: &str) -> Result<i64> {
        self.add_like_at(ip, local_now())
    }

    /// `at` is local wall-clock time; date bucketing in the stats relies on it.
    pub fn add_like_at(&self, ip: &str, at: NaiveDateTime) -> Result<i64> {
        let at = format_timestamp(at);
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO likes (ip, created_at) VALUES (?1, ?2)",
                params![ip, at],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_like_count(&self) -> Result<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM likes", [], |row| row.get(0))?)
        })
    }

    pub fn get_likes_for_export(&self) -> Result<Vec<LikeExportRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, ip, datetime(created_at)
                 FROM likes
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(LikeExportRow {
                        id: row.get(0)?,
                        ip: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DbError::validation(format!("guest {} is required", field))),
    }
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn query_photos(conn: &Connection) -> Result<Vec<Photo>> {
    let mut stmt = conn.prepare(
        "SELECT id, url, description, COALESCE(order_num, 0), created_at
         FROM photos
         ORDER BY COALESCE(order_num, 0), id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(Photo {
                id: row.get(0)?,
                url: row.get(1)?,
                description: row.get(2)?,
                order_num: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_guests(conn: &Connection, pattern: Option<&str>) -> Result<Vec<Guest>> {
    let select = "SELECT id, name, phone, message, attendance, created_at FROM guests";
    let order = "ORDER BY created_at DESC, id DESC";

    let rows = match pattern {
        Some(pattern) => {
            let mut stmt = conn.prepare(&format!(
                "{} WHERE name LIKE ?1 ESCAPE '\\' OR phone LIKE ?1 ESCAPE '\\' {}",
                select, order
            ))?;
            stmt.query_map([pattern], guest_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
        None => {
            let mut stmt = conn.prepare(&format!("{} {}", select, order))?;
            stmt.query_map([], guest_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok(rows)
}

fn guest_from_row(row: &Row<'_>) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        message: row.get(3)?,
        attendance: row.get(4)?,
        created_at: row.get(5)?,
    })
}
